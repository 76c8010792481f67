use crate::core::Result;
use async_trait::async_trait;

/// Host-side record of invoice payments
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Mark the invoice identified by `order_ref` as paid through `gateway`
    async fn payment_done(&self, order_ref: &str, gateway: &str) -> Result<()>;
}
