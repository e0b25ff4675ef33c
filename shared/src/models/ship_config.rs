//! Shipping Config Models

use serde::{Deserialize, Serialize};

/// Shipping fee configuration; at most one row is active
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShipConfig {
    pub id: i64,
    pub name: String,
    /// Orders at or above this value ship free
    pub free_ship_threshold: f64,
    /// Fee charged below the threshold
    pub flat_fee: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shipping config payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfigCreate {
    pub name: String,
    pub free_ship_threshold: f64,
    pub flat_fee: f64,
    pub is_active: Option<bool>,
}

/// Update shipping config payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfigUpdate {
    pub name: Option<String>,
    pub free_ship_threshold: Option<f64>,
    pub flat_fee: Option<f64>,
    pub is_active: Option<bool>,
}

/// Fee calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingFeeRequest {
    pub order_value: f64,
}

/// Shipping fee quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Active config used, `None` when nothing is configured
    pub config_id: Option<i64>,
    pub shipping_fee: f64,
    pub is_free: bool,
    pub free_ship_threshold: Option<f64>,
    /// How much more the customer must spend for free shipping
    pub amount_to_free: f64,
}
