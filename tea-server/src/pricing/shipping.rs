//! Shipping fee calculation

use rust_decimal::prelude::*;
use shared::models::{ShipConfig, ShippingQuote};

use crate::utils::money::{to_decimal, to_f64};
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use crate::utils::AppError;

/// Quote the fee for `order_value` under the active config.
///
/// At or above the threshold shipping is free; below it the flat fee applies.
/// Without an active config nothing is charged.
pub fn calculate_shipping_fee(config: Option<&ShipConfig>, order_value: f64) -> ShippingQuote {
    let Some(config) = config else {
        return ShippingQuote {
            config_id: None,
            shipping_fee: 0.0,
            is_free: true,
            free_ship_threshold: None,
            amount_to_free: 0.0,
        };
    };

    let order = to_decimal(order_value);
    let threshold = to_decimal(config.free_ship_threshold);

    if order >= threshold {
        ShippingQuote {
            config_id: Some(config.id),
            shipping_fee: 0.0,
            is_free: true,
            free_ship_threshold: Some(config.free_ship_threshold),
            amount_to_free: 0.0,
        }
    } else {
        ShippingQuote {
            config_id: Some(config.id),
            shipping_fee: to_f64(to_decimal(config.flat_fee).max(Decimal::ZERO)),
            is_free: false,
            free_ship_threshold: Some(config.free_ship_threshold),
            amount_to_free: to_f64(threshold - order),
        }
    }
}

pub fn validate_config(name: Option<&str>, threshold: Option<f64>, flat_fee: Option<f64>) -> Result<(), AppError> {
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(t) = threshold {
        validate_amount(t, "free_ship_threshold")?;
    }
    if let Some(f) = flat_fee {
        validate_amount(f, "flat_fee")?;
    }
    Ok(())
}
