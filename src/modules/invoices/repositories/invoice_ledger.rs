use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::traits::PaymentLedger;
use crate::core::Result;

const MARK_PAID_SQL: &str = r#"
    UPDATE invoices
    SET status = 'paid', paid_with = ?, paid_at = NOW()
    WHERE id = ? AND status <> 'paid'
"#;

/// Records gateway settlements on the billing platform's invoices table
#[derive(Clone)]
pub struct InvoiceLedger {
    pool: MySqlPool,
}

impl InvoiceLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentLedger for InvoiceLedger {
    /// Mark an invoice paid.
    ///
    /// Already-paid or unknown invoices leave the table untouched and are
    /// only logged, so a redelivered callback is harmless.
    async fn payment_done(&self, order_ref: &str, gateway: &str) -> Result<()> {
        let result = sqlx::query(MARK_PAID_SQL)
            .bind(gateway)
            .bind(order_ref)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(
                order_ref = %order_ref,
                gateway = %gateway,
                "Invoice not found or already paid"
            );
        } else {
            info!(order_ref = %order_ref, gateway = %gateway, "Invoice marked paid");
        }

        Ok(())
    }
}
