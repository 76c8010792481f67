use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::gateway_trait::{
    required_setting, settle, string_field, InitiationError, PaymentGateway,
};
use super::http::send_json;
use crate::core::amount;
use crate::core::signature::{sha256_hex, signatures_match};
use crate::core::traits::{ConfigStore, PaymentLedger};
use crate::modules::gateways::models::{
    ConfigField, GatewayMetadata, PaymentRequest, StatusAction, WebhookNotification,
    WebhookOutcome, WebhookRejection,
};

pub const DUITKU: &str = "Duitku";

const DEFAULT_BASE_URL: &str = "https://sandbox.duitku.com";
const INQUIRY_PATH: &str = "/webapi/api/merchant/v2/inquiry";

/// Duitku payment gateway client
///
/// Requests are authenticated only by the embedded SHA-256 signature; no
/// auth header is sent. Every `initiate` call goes through to the API.
pub struct DuitkuGateway {
    client: Client,
    settings: Arc<dyn ConfigStore>,
    ledger: Arc<dyn PaymentLedger>,
    base_url: String,
}

impl DuitkuGateway {
    /// Create a new Duitku client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client (carries the request timeout)
    /// * `settings` - Store holding `merchant_code`, `api_key` and `callback_url`
    /// * `ledger` - Receives `payment_done` for settled callbacks
    /// * `base_url` - Duitku API base URL (defaults to sandbox)
    pub fn new(
        client: Client,
        settings: Arc<dyn ConfigStore>,
        ledger: Arc<dyn PaymentLedger>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            settings,
            ledger,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// Inquiry signature: SHA256(merchant_code + order_ref + amount + api_key)
    pub fn request_signature(
        merchant_code: &str,
        order_ref: &str,
        amount: &str,
        api_key: &str,
    ) -> String {
        let signature_string = format!("{}{}{}{}", merchant_code, order_ref, amount, api_key);
        sha256_hex(signature_string.as_bytes())
    }

    /// Callback signature: SHA256(merchantOrderId + statusCode + api_key)
    pub fn callback_signature(order_ref: &str, status_code: &str, api_key: &str) -> String {
        let signature_string = format!("{}{}{}", order_ref, status_code, api_key);
        sha256_hex(signature_string.as_bytes())
    }

    /// "00" is a settled payment; "01" and "02" are final states with
    /// nothing to record.
    pub fn classify_status(status_code: &str) -> StatusAction {
        match status_code {
            "00" => StatusAction::MarkPaid,
            "01" | "02" => StatusAction::Acknowledge,
            _ => StatusAction::Reject,
        }
    }

    fn inquiry_url(&self) -> String {
        format!("{}{}", self.base_url, INQUIRY_PATH)
    }

    async fn setting(&self, key: &'static str) -> Result<String, InitiationError> {
        required_setting(self.settings.as_ref(), DUITKU, key)
            .await
            .ok_or(InitiationError::ConfigMissing {
                gateway: DUITKU,
                key,
            })
    }
}

#[async_trait]
impl PaymentGateway for DuitkuGateway {
    fn name(&self) -> &'static str {
        DUITKU
    }

    fn metadata(&self) -> GatewayMetadata {
        GatewayMetadata {
            display_name: DUITKU.to_string(),
            version: "1.0.0".to_string(),
            author: "0xricoard".to_string(),
            website: "https://servermikro.com".to_string(),
        }
    }

    fn config_schema(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::text("merchant_code", "Merchant Code"),
            ConfigField::text("api_key", "API Key"),
            ConfigField::text("callback_url", "Callback URL"),
        ]
    }

    async fn initiate(&self, request: &PaymentRequest) -> Result<String, InitiationError> {
        request.validate().map_err(InitiationError::InvalidRequest)?;

        let merchant_code = self.setting("merchant_code").await?;
        let api_key = self.setting("api_key").await?;
        let callback_url = self.setting("callback_url").await?;

        let amount = request.formatted_total();
        let payment_amount = amount::to_whole_i64(request.total)
            .ok_or_else(|| InitiationError::InvalidRequest("total is out of range".to_string()))?;

        let items = request
            .items
            .iter()
            .map(|item| {
                amount::to_whole_i64(item.price)
                    .map(|price| ProductDetail {
                        name: &item.name,
                        price,
                        quantity: item.quantity,
                    })
                    .ok_or_else(|| {
                        InitiationError::InvalidRequest(format!(
                            "price of '{}' is out of range",
                            item.name
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Duitku takes the item list as a JSON-encoded string
        let product_details = serde_json::to_string(&items).map_err(|e| {
            InitiationError::InvalidRequest(format!("cannot encode product details: {}", e))
        })?;

        let payload = InquiryRequest {
            merchant_code: &merchant_code,
            payment_amount,
            merchant_order_id: &request.order_ref,
            product_details,
            additional_param: "",
            merchant_user_info: &request.payer.email,
            email: &request.payer.email,
            callback_url: &callback_url,
            return_url: &request.return_url,
            signature: Self::request_signature(
                &merchant_code,
                &request.order_ref,
                &amount,
                &api_key,
            ),
        };

        debug!(
            gateway = DUITKU,
            order_ref = %request.order_ref,
            amount = %amount,
            signature = %payload.signature,
            "Sending Duitku inquiry"
        );

        let body = send_json(DUITKU, self.client.post(self.inquiry_url()).json(&payload)).await?;

        if !is_success_status(body.get("statusCode")) {
            error!(gateway = DUITKU, response = %body, "Duitku Payment Error");
            return Err(InitiationError::Declined {
                gateway: DUITKU,
                body: body.to_string(),
            });
        }

        body.get("paymentUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| InitiationError::UnexpectedResponse {
                gateway: DUITKU,
                detail: format!("missing paymentUrl in {}", body),
            })
    }

    async fn handle_webhook(
        &self,
        notification: &WebhookNotification,
    ) -> Result<WebhookOutcome, WebhookRejection> {
        let data: Value = serde_json::from_slice(&notification.raw_body).map_err(|e| {
            error!(gateway = DUITKU, error = %e, "Invalid JSON data");
            WebhookRejection::InvalidJson(e.to_string())
        })?;

        let api_key = required_setting(self.settings.as_ref(), DUITKU, "api_key")
            .await
            .ok_or(WebhookRejection::NotConfigured("api_key"))?;

        let order_ref = string_field(&data, "merchantOrderId");
        let status_code = string_field(&data, "statusCode");
        let received_signature = string_field(&data, "signature").unwrap_or_default();

        let calculated_signature = Self::callback_signature(
            order_ref.as_deref().unwrap_or_default(),
            status_code.as_deref().unwrap_or_default(),
            &api_key,
        );

        debug!(
            gateway = DUITKU,
            order_ref = ?order_ref,
            status_code = ?status_code,
            received_signature = %received_signature,
            calculated_signature = %calculated_signature,
            "Duitku webhook data"
        );

        if !signatures_match(&calculated_signature, &received_signature) {
            error!(
                gateway = DUITKU,
                received_signature = %received_signature,
                calculated_signature = %calculated_signature,
                "Invalid signature"
            );
            return Err(WebhookRejection::InvalidSignature);
        }

        let (Some(order_ref), Some(status_code)) = (order_ref, status_code) else {
            error!(gateway = DUITKU, payload = %data, "Missing parameters");
            return Err(WebhookRejection::MissingParameters);
        };

        let action = Self::classify_status(&status_code);
        settle(self.ledger.as_ref(), DUITKU, order_ref, status_code, action).await
    }
}

/// Duitku reports success as "00"; older responses use 200
fn is_success_status(status: Option<&Value>) -> bool {
    match status {
        Some(Value::String(code)) => code == "00" || code == "200",
        Some(Value::Number(code)) => code.as_i64() == Some(200),
        _ => false,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InquiryRequest<'a> {
    merchant_code: &'a str,
    payment_amount: i64,
    merchant_order_id: &'a str,
    product_details: String,
    additional_param: &'a str,
    merchant_user_info: &'a str,
    email: &'a str,
    callback_url: &'a str,
    return_url: &'a str,
    signature: String,
}

#[derive(Debug, Serialize)]
struct ProductDetail<'a> {
    name: &'a str,
    price: i64,
    quantity: u32,
}
