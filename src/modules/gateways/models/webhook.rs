use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw callback received from a payment provider
#[derive(Debug, Clone, Default)]
pub struct WebhookNotification {
    /// Body exactly as received; Tripay signs these bytes
    pub raw_body: Vec<u8>,

    /// Header names are stored lowercase
    headers: HashMap<String, String>,
}

impl WebhookNotification {
    pub fn new(raw_body: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_body: raw_body.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// What a provider status code means for the invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Payment settled, mark the invoice paid
    MarkPaid,
    /// Known terminal status with nothing to record (expired, failed)
    Acknowledge,
    /// Status the gateway does not recognise
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookAction {
    MarkedPaid,
    Acknowledged,
}

/// Result of an accepted callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    pub order_ref: String,
    pub status: String,
    pub action: WebhookAction,
}

/// Reasons a callback is turned away
#[derive(thiserror::Error, Debug)]
pub enum WebhookRejection {
    #[error("Invalid JSON data: {0}")]
    InvalidJson(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing parameters")]
    MissingParameters,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Gateway setting '{0}' is not configured")]
    NotConfigured(&'static str),

    #[error("Failed to record payment: {0}")]
    LedgerFailure(String),
}

impl WebhookRejection {
    /// Message returned to the provider
    pub fn message(&self) -> &'static str {
        match self {
            WebhookRejection::InvalidJson(_) => "Invalid JSON data",
            WebhookRejection::InvalidSignature => "Invalid signature",
            WebhookRejection::MissingParameters => "Missing parameters",
            WebhookRejection::InvalidStatus(_) => "Invalid status",
            WebhookRejection::NotConfigured(_) => "Gateway not configured",
            WebhookRejection::LedgerFailure(_) => "Failed to record payment",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // Ledger failures are ours; a 5xx lets the provider redeliver
            WebhookRejection::LedgerFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body returned to the provider for every callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

impl From<&WebhookRejection> for WebhookResponse {
    fn from(rejection: &WebhookRejection) -> Self {
        WebhookResponse::rejected(rejection.message())
    }
}
