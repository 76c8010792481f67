//! Rupiah amount handling shared by the gateways.
//!
//! Both providers take whole rupiah. Amounts are rounded half away from zero
//! and rendered without separators or a decimal point, which is also the form
//! that goes into every signature.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole rupiah
pub fn whole_rupiah(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount as the digits-only string used in payloads and signatures
pub fn format_whole(amount: Decimal) -> String {
    whole_rupiah(amount).normalize().to_string()
}

/// Converts an amount to an integer number of rupiah
pub fn to_whole_i64(amount: Decimal) -> Option<i64> {
    whole_rupiah(amount).to_i64()
}

/// Validates a payable total
pub fn validate_total(amount: Decimal) -> Result<(), String> {
    if amount <= Decimal::ZERO {
        return Err(format!("total must be positive, got {}", amount));
    }

    if whole_rupiah(amount) <= Decimal::ZERO {
        return Err(format!("total {} rounds to zero rupiah", amount));
    }

    if to_whole_i64(amount).is_none() {
        return Err(format!("total {} is out of range", amount));
    }

    Ok(())
}
