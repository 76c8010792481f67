use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::amount;

/// Data needed to start a payment with any gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Invoice or order identifier, echoed back by the provider in callbacks
    pub order_ref: String,

    /// Amount payable in rupiah
    pub total: Decimal,

    /// Line items, in display order
    pub items: Vec<OrderItem>,

    pub payer: Payer,

    /// Where the provider sends the payer after checkout
    pub return_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payer {
    pub name: String,
    pub email: String,
}

impl PaymentRequest {
    /// Check the request before anything is signed or sent
    pub fn validate(&self) -> Result<(), String> {
        if self.order_ref.trim().is_empty() {
            return Err("order reference cannot be empty".to_string());
        }

        amount::validate_total(self.total)?;

        for item in &self.items {
            if item.quantity == 0 {
                return Err(format!("item '{}' must have a positive quantity", item.name));
            }
            if item.price < Decimal::ZERO {
                return Err(format!("item '{}' cannot have a negative price", item.name));
            }
        }

        Ok(())
    }

    /// Total rendered as whole rupiah for payloads and signatures
    pub fn formatted_total(&self) -> String {
        amount::format_whole(self.total)
    }
}
