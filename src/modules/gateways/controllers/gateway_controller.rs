use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::modules::gateways::models::{OrderItem, Payer, PaymentRequest};
use crate::modules::gateways::services::GatewayService;

/// Checkout request from the billing frontend
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub order_ref: String,
    pub total: Decimal,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub customer_email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub checkout_url: String,
}

/// List all available payment gateways
/// GET /gateways
/// Returns each gateway with its metadata and settings schema
pub async fn list_gateways(service: web::Data<GatewayService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list_gateways()))
}

/// Start a payment and hand back the provider checkout URL
/// POST /gateways/{gateway}/checkout
///
/// Any failure is reported as `{success: false, message}`; the caller must not redirect.
pub async fn checkout(
    path: web::Path<String>,
    body: web::Json<CheckoutRequest>,
    service: web::Data<GatewayService>,
    app: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let gateway_name = path.into_inner();
    let body = body.into_inner();

    let request = PaymentRequest {
        return_url: app.return_url(&body.order_ref),
        order_ref: body.order_ref,
        total: body.total,
        items: body.items,
        payer: Payer {
            name: body.customer_name,
            email: body.customer_email,
        },
    };

    let checkout_url = service.create_payment(&gateway_name, &request).await?;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        success: true,
        checkout_url,
    }))
}

/// Report malformed checkout bodies in the same envelope as other errors
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

/// Configure gateway routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gateways")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("", web::get().to(list_gateways))
            .route("/{gateway}/checkout", web::post().to(checkout)),
    );
}
