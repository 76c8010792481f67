use crate::core::traits::{ConfigStore, PaymentLedger};
use crate::core::AppError;
use crate::modules::gateways::models::{
    ConfigField, GatewayMetadata, PaymentRequest, StatusAction, WebhookAction,
    WebhookNotification, WebhookOutcome, WebhookRejection,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A payment provider integration: metadata, settings schema, payment
/// initiation and callback handling.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Gateway name as used for settings lookups and ledger records
    fn name(&self) -> &'static str;

    fn metadata(&self) -> GatewayMetadata;

    /// Settings an operator must provide before the gateway is usable
    fn config_schema(&self) -> Vec<ConfigField>;

    /// Create a payment with the provider and return the checkout URL
    async fn initiate(&self, request: &PaymentRequest) -> Result<String, InitiationError>;

    /// Verify and act on a provider callback
    async fn handle_webhook(
        &self,
        notification: &WebhookNotification,
    ) -> Result<WebhookOutcome, WebhookRejection>;

    /// Redirect-or-nothing form of [`PaymentGateway::initiate`].
    ///
    /// Every failure is logged and collapses to `None`; callers must not redirect.
    async fn pay(&self, request: &PaymentRequest) -> Option<String> {
        match self.initiate(request).await {
            Ok(url) => Some(url),
            Err(e) => {
                error!(
                    gateway = self.name(),
                    order_ref = %request.order_ref,
                    error = %e,
                    "Payment initiation failed"
                );
                None
            }
        }
    }
}

/// Why a payment could not be initiated
///
/// Cloneable so a failure shared by coalesced Tripay initiations can be
/// handed to every waiter.
#[derive(thiserror::Error, Debug, Clone)]
pub enum InitiationError {
    #[error("Invalid payment request: {0}")]
    InvalidRequest(String),

    #[error("{gateway} setting '{key}' is not configured")]
    ConfigMissing {
        gateway: &'static str,
        key: &'static str,
    },

    #[error("{gateway} gateway unavailable: {source}")]
    Network {
        gateway: &'static str,
        #[source]
        source: Arc<reqwest::Error>,
    },

    #[error("{gateway} API error - HTTP {status} ({body})")]
    HttpStatus {
        gateway: &'static str,
        status: u16,
        body: String,
    },

    #[error("{gateway} returned an unexpected response: {detail}")]
    UnexpectedResponse {
        gateway: &'static str,
        detail: String,
    },

    #[error("{gateway} declined the payment request ({body})")]
    Declined { gateway: &'static str, body: String },
}

impl From<InitiationError> for AppError {
    fn from(err: InitiationError) -> Self {
        match err {
            InitiationError::InvalidRequest(msg) => AppError::Validation(msg),
            InitiationError::ConfigMissing { .. } => AppError::Configuration(err.to_string()),
            // Provider bodies are logged by the caller, never echoed back
            InitiationError::Network { gateway, .. }
            | InitiationError::HttpStatus { gateway, .. }
            | InitiationError::UnexpectedResponse { gateway, .. }
            | InitiationError::Declined { gateway, .. } => {
                AppError::Gateway(format!("{} could not start the payment", gateway))
            }
        }
    }
}

/// Fetch a setting, treating blank values as missing
pub(crate) async fn required_setting(
    settings: &dyn ConfigStore,
    gateway: &'static str,
    key: &'static str,
) -> Option<String> {
    settings
        .get(gateway, key)
        .await
        .filter(|value| !value.trim().is_empty())
}

/// Read a callback field as a string. Numbers are accepted in their JSON
/// form; empty strings count as absent.
pub(crate) fn string_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Apply a classified callback status
pub(crate) async fn settle(
    ledger: &dyn PaymentLedger,
    gateway: &'static str,
    order_ref: String,
    status: String,
    action: StatusAction,
) -> Result<WebhookOutcome, WebhookRejection> {
    match action {
        StatusAction::MarkPaid => {
            ledger
                .payment_done(&order_ref, gateway)
                .await
                .map_err(|e| {
                    error!(
                        gateway = gateway,
                        order_ref = %order_ref,
                        error = %e,
                        "Failed to mark invoice paid"
                    );
                    WebhookRejection::LedgerFailure(e.to_string())
                })?;

            info!(gateway = gateway, order_ref = %order_ref, status = %status, "Invoice marked paid");

            Ok(WebhookOutcome {
                order_ref,
                status,
                action: WebhookAction::MarkedPaid,
            })
        }
        StatusAction::Acknowledge => {
            info!(gateway = gateway, order_ref = %order_ref, status = %status, "Callback acknowledged");

            Ok(WebhookOutcome {
                order_ref,
                status,
                action: WebhookAction::Acknowledged,
            })
        }
        StatusAction::Reject => {
            warn!(gateway = gateway, order_ref = %order_ref, status = %status, "Unknown callback status");
            Err(WebhookRejection::InvalidStatus(status))
        }
    }
}
