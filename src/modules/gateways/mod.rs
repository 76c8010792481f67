pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{
    ConfigField, GatewayMetadata, OrderItem, Payer, PaymentRequest, WebhookNotification,
    WebhookOutcome, WebhookRejection, WebhookResponse,
};
pub use services::{
    CheckoutUrlCache, DuitkuGateway, GatewayInfo, GatewayService, InitiationError,
    PaymentGateway, TripayGateway,
};
