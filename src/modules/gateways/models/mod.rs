pub mod gateway_config;
pub mod payment_request;
pub mod webhook;

pub use gateway_config::{ConfigField, FieldType, GatewayMetadata};
pub use payment_request::{OrderItem, Payer, PaymentRequest};
pub use webhook::{
    StatusAction, WebhookAction, WebhookNotification, WebhookOutcome, WebhookRejection,
    WebhookResponse,
};
