//! Money helpers
//!
//! Amounts are `f64` at the storage / wire boundary and `Decimal` inside
//! calculations, rounded to 2 dp half away from zero.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Inputs are bounded by `validate_amount` before they get here; anything
/// outside `Decimal` range saturates so comparisons keep their order.
/// NaN maps to zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(d) => d,
        None if value.is_nan() => Decimal::ZERO,
        None if value > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// unit_price × quantity
pub fn line_total(unit_price: f64, quantity: i64) -> Decimal {
    let total = to_decimal(unit_price)
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(Decimal::MAX);
    round(total)
}
