use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::checkout_cache::CheckoutUrlCache;
use super::gateway_trait::{
    required_setting, settle, string_field, InitiationError, PaymentGateway,
};
use super::http::send_json;
use crate::core::amount;
use crate::core::signature::{hmac_sha256_hex, signatures_match};
use crate::core::traits::{ConfigStore, PaymentLedger};
use crate::modules::gateways::models::{
    ConfigField, GatewayMetadata, PaymentRequest, StatusAction, WebhookNotification,
    WebhookOutcome, WebhookRejection,
};

pub const TRIPAY: &str = "Tripay";

/// Header carrying the callback HMAC
pub const SIGNATURE_HEADER: &str = "X-Callback-Signature";

const DEFAULT_BASE_URL: &str = "https://tripay.co.id";
const CREATE_TRANSACTION_PATH: &str = "/api/transaction/create";

/// Tripay payment gateway client
///
/// Transactions are created with a bearer API key and an HMAC-SHA256
/// signature keyed with the merchant private key. Checkout URLs are cached
/// per order so repeated checkouts reuse the same transaction.
pub struct TripayGateway {
    client: Client,
    settings: Arc<dyn ConfigStore>,
    ledger: Arc<dyn PaymentLedger>,
    base_url: String,
    cache: CheckoutUrlCache,
}

impl TripayGateway {
    /// Create a new Tripay client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client (carries the request timeout)
    /// * `settings` - Store holding `api_key`, `private_key`, `merchant_code`
    ///   and `payment_method`
    /// * `ledger` - Receives `payment_done` for settled callbacks
    /// * `base_url` - Tripay API base URL (defaults to production)
    /// * `cache` - Checkout URL cache
    pub fn new(
        client: Client,
        settings: Arc<dyn ConfigStore>,
        ledger: Arc<dyn PaymentLedger>,
        base_url: Option<String>,
        cache: CheckoutUrlCache,
    ) -> Self {
        Self {
            client,
            settings,
            ledger,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            cache,
        }
    }

    /// Transaction signature: HMAC-SHA256(private_key, merchant_code + order_ref + amount)
    pub fn request_signature(
        merchant_code: &str,
        order_ref: &str,
        amount: &str,
        private_key: &str,
    ) -> String {
        let signature_string = format!("{}{}{}", merchant_code, order_ref, amount);
        hmac_sha256_hex(private_key.as_bytes(), signature_string.as_bytes())
    }

    /// Callback signature: HMAC-SHA256(private_key, raw body)
    pub fn callback_signature(raw_body: &[u8], private_key: &str) -> String {
        hmac_sha256_hex(private_key.as_bytes(), raw_body)
    }

    pub fn classify_status(status: &str) -> StatusAction {
        match status {
            "PAID" => StatusAction::MarkPaid,
            "EXPIRED" | "FAILED" => StatusAction::Acknowledge,
            _ => StatusAction::Reject,
        }
    }

    pub fn cache_key(order_ref: &str) -> String {
        format!("tripay_checkout_url_{}", order_ref)
    }

    fn create_transaction_url(&self) -> String {
        format!("{}{}", self.base_url, CREATE_TRANSACTION_PATH)
    }

    async fn setting(&self, key: &'static str) -> Result<String, InitiationError> {
        required_setting(self.settings.as_ref(), TRIPAY, key)
            .await
            .ok_or(InitiationError::ConfigMissing {
                gateway: TRIPAY,
                key,
            })
    }

    /// Create the Tripay transaction and extract its checkout URL.
    ///
    /// Only reached on a cache miss.
    async fn create_transaction(
        &self,
        request: &PaymentRequest,
    ) -> Result<String, InitiationError> {
        request.validate().map_err(InitiationError::InvalidRequest)?;

        let api_key = self.setting("api_key").await?;
        let private_key = self.setting("private_key").await?;
        let merchant_code = self.setting("merchant_code").await?;
        let payment_method = self.setting("payment_method").await?;

        let amount = request.formatted_total();

        let order_items = request
            .items
            .iter()
            .map(|item| {
                amount::to_whole_i64(item.price)
                    .map(|price| OrderItem {
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

        let payload = TransactionRequest {
            method: &payment_method,
            merchant_ref: &request.order_ref,
            customer_name: &request.payer.name,
            customer_email: &request.payer.email,
            signature: Self::request_signature(
                &merchant_code,
                &request.order_ref,
                &amount,
                &private_key,
            ),
            amount,
            order_items,
            return_url: &request.return_url,
        };

        debug!(
            gateway = TRIPAY,
            request = ?payload,
            "Tripay request data"
        );

        let body = send_json(
            TRIPAY,
            self.client
                .post(self.create_transaction_url())
                .bearer_auth(&api_key)
                .json(&payload),
        )
        .await?;

        if body.get("success") == Some(&Value::Bool(false)) {
            error!(gateway = TRIPAY, response = %body, "Tripay Payment Error");
            return Err(InitiationError::Declined {
                gateway: TRIPAY,
                body: body.to_string(),
            });
        }

        let checkout_url = body
            .pointer("/data/checkout_url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| InitiationError::UnexpectedResponse {
                gateway: TRIPAY,
                detail: format!("missing data.checkout_url in {}", body),
            })?;

        info!(
            gateway = TRIPAY,
            order_ref = %request.order_ref,
            "Tripay transaction created"
        );

        Ok(checkout_url)
    }
}

#[async_trait]
impl PaymentGateway for TripayGateway {
    fn name(&self) -> &'static str {
        TRIPAY
    }

    fn metadata(&self) -> GatewayMetadata {
        GatewayMetadata {
            display_name: TRIPAY.to_string(),
            version: "1.0.0".to_string(),
            author: "0xricoard".to_string(),
            website: "https://servermikro.com".to_string(),
        }
    }

    fn config_schema(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::text("api_key", "API Key"),
            ConfigField::text("private_key", "Private Key"),
            ConfigField::text("merchant_code", "Merchant Code"),
            ConfigField::text("payment_method", "Payment Method"),
        ]
    }

    async fn initiate(&self, request: &PaymentRequest) -> Result<String, InitiationError> {
        self.cache
            .get_or_try_insert_with(
                Self::cache_key(&request.order_ref),
                self.create_transaction(request),
            )
            .await
            .map_err(|e| (*e).clone())
    }

    async fn handle_webhook(
        &self,
        notification: &WebhookNotification,
    ) -> Result<WebhookOutcome, WebhookRejection> {
        let private_key = required_setting(self.settings.as_ref(), TRIPAY, "private_key")
            .await
            .ok_or(WebhookRejection::NotConfigured("private_key"))?;

        debug!(
            gateway = TRIPAY,
            body = %String::from_utf8_lossy(&notification.raw_body),
            "Tripay webhook received"
        );

        // The signature covers the raw body, so it is checked before parsing
        let received_signature = notification.header(SIGNATURE_HEADER).unwrap_or_default();
        let calculated_signature = Self::callback_signature(&notification.raw_body, &private_key);

        debug!(
            gateway = TRIPAY,
            received_signature = %received_signature,
            calculated_signature = %calculated_signature,
            "Tripay webhook signature verification"
        );

        if !signatures_match(&calculated_signature, received_signature) {
            error!(
                gateway = TRIPAY,
                received_signature = %received_signature,
                calculated_signature = %calculated_signature,
                "Invalid signature"
            );
            return Err(WebhookRejection::InvalidSignature);
        }

        let data: Value = serde_json::from_slice(&notification.raw_body).map_err(|e| {
            error!(gateway = TRIPAY, error = %e, "Invalid JSON data");
            WebhookRejection::InvalidJson(e.to_string())
        })?;

        let (Some(merchant_ref), Some(status)) =
            (string_field(&data, "merchant_ref"), string_field(&data, "status"))
        else {
            error!(gateway = TRIPAY, payload = %data, "Missing parameters");
            return Err(WebhookRejection::MissingParameters);
        };

        let action = Self::classify_status(&status);
        settle(self.ledger.as_ref(), TRIPAY, merchant_ref, status, action).await
    }
}

#[derive(Debug, Serialize)]
struct TransactionRequest<'a> {
    method: &'a str,
    merchant_ref: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    signature: String,
    amount: String,
    order_items: Vec<OrderItem<'a>>,
    return_url: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderItem<'a> {
    name: &'a str,
    price: i64,
    quantity: u32,
}
