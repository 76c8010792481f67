use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::{error, info, warn};

use super::gateway_trait::PaymentGateway;
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{
    ConfigField, GatewayMetadata, PaymentRequest, WebhookNotification, WebhookResponse,
};

/// Service for managing and routing to payment gateways
pub struct GatewayService {
    gateways: HashMap<String, Arc<dyn PaymentGateway>>,
}

impl GatewayService {
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
        }
    }

    /// Register a gateway under its lowercase name
    pub fn register_gateway(&mut self, gateway: Arc<dyn PaymentGateway>) {
        let name = gateway.name().to_ascii_lowercase();
        self.gateways.insert(name, gateway);
    }

    /// Get a gateway by name (case-insensitive)
    pub fn get_gateway(&self, name: &str) -> Result<Arc<dyn PaymentGateway>> {
        self.gateways
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Gateway '{}' not found", name)))
    }

    /// Create a payment using the specified gateway and return the checkout URL
    pub async fn create_payment(
        &self,
        gateway_name: &str,
        request: &PaymentRequest,
    ) -> Result<String> {
        info!(
            gateway = %gateway_name,
            order_ref = %request.order_ref,
            total = %request.total,
            "Creating payment with gateway"
        );

        let gateway = self.get_gateway(gateway_name)?;

        match gateway.initiate(request).await {
            Ok(checkout_url) => {
                info!(
                    gateway = %gateway_name,
                    order_ref = %request.order_ref,
                    "Payment created successfully"
                );
                Ok(checkout_url)
            }
            Err(e) => {
                error!(
                    gateway = %gateway_name,
                    order_ref = %request.order_ref,
                    error = %e,
                    "Failed to create payment"
                );
                Err(e.into())
            }
        }
    }

    /// Handle a provider callback and produce the response sent back to it.
    ///
    /// Always yields a response; unknown gateways get a 404.
    pub async fn handle_webhook(
        &self,
        gateway_name: &str,
        notification: &WebhookNotification,
    ) -> (StatusCode, WebhookResponse) {
        let Ok(gateway) = self.get_gateway(gateway_name) else {
            warn!(gateway = %gateway_name, "Webhook for unknown gateway");
            return (
                StatusCode::NOT_FOUND,
                WebhookResponse::rejected("Unknown gateway"),
            );
        };

        match gateway.handle_webhook(notification).await {
            Ok(outcome) => {
                info!(
                    gateway = gateway.name(),
                    order_ref = %outcome.order_ref,
                    status = %outcome.status,
                    action = ?outcome.action,
                    "Webhook processed successfully"
                );
                (StatusCode::OK, WebhookResponse::accepted())
            }
            Err(rejection) => {
                warn!(
                    gateway = gateway.name(),
                    reason = %rejection,
                    "Webhook rejected"
                );
                (rejection.status_code(), WebhookResponse::from(&rejection))
            }
        }
    }

    /// List all registered gateways, sorted by name
    pub fn list_gateways(&self) -> Vec<GatewayInfo> {
        let mut gateways: Vec<GatewayInfo> = self
            .gateways
            .iter()
            .map(|(name, gateway)| GatewayInfo {
                name: name.clone(),
                metadata: gateway.metadata(),
                config: gateway.config_schema(),
            })
            .collect();
        gateways.sort_by(|a, b| a.name.cmp(&b.name));
        gateways
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway information for listing
#[derive(Debug, Clone, Serialize)]
pub struct GatewayInfo {
    pub name: String,
    pub metadata: GatewayMetadata,
    pub config: Vec<ConfigField>,
}
