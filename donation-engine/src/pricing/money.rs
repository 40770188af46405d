//! Money and weight arithmetic helpers
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for the shared wire types.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed amount per item (₹10,00,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `rate × quantity`, rounded
#[inline]
pub fn multiply(rate: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(rate) * Decimal::from(quantity))
}

/// Format an amount for donor-facing messages (drops a zero fraction)
pub fn format_amount(value: f64) -> String {
    to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
