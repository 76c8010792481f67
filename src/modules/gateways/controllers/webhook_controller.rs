use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::modules::gateways::models::WebhookNotification;
use crate::modules::gateways::services::GatewayService;

/// Receive a payment provider callback
///
/// POST /webhooks/{gateway}
///
/// The body is passed on untouched because Tripay signs the raw bytes.
///
/// # Returns
/// * `200 OK` - `{"success": true}`
/// * `400 Bad Request` - `{"success": false, "message": ...}` for invalid JSON,
///   signature, parameters or status
/// * `404 Not Found` - unknown gateway
/// * `500 Internal Server Error` - the payment could not be recorded
#[post("/{gateway}")]
async fn receive_webhook(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    service: web::Data<GatewayService>,
) -> HttpResponse {
    let gateway_name = path.into_inner();

    info!(
        gateway = gateway_name.as_str(),
        bytes = body.len(),
        "Received webhook request"
    );

    let notification = notification_from_request(&req, &body);
    let (status, response) = service.handle_webhook(&gateway_name, &notification).await;

    HttpResponse::build(status).json(response)
}

/// Copy the raw body and readable headers into a notification
fn notification_from_request(req: &HttpRequest, body: &[u8]) -> WebhookNotification {
    req.headers()
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .fold(WebhookNotification::new(body.to_vec()), |notification, (name, value)| {
            notification.with_header(name, value)
        })
}

/// Configure webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/webhooks").service(receive_webhook));
}
