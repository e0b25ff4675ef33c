//! Discount Models

use serde::{Deserialize, Serialize};

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DiscountType {
    /// `value` is a percent in (0, 100]
    Percentage,
    /// `value` is an amount in VND
    Fixed,
}

/// Discount (coupon) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Discount {
    pub id: i64,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: f64,
    /// Cap for percentage discounts
    pub max_discount_amount: Option<f64>,
    pub min_order_value: f64,
    pub usage_limit: Option<i64>,
    pub used_count: i64,
    pub per_user_limit: Option<i64>,
    /// Validity window start (Unix millis)
    pub start_date: i64,
    /// Validity window end (Unix millis)
    pub end_date: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Usage record written at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiscountUsage {
    pub id: i64,
    pub discount_id: i64,
    pub user_id: Option<i64>,
    pub order_id: i64,
    pub used_at: i64,
}

/// Create discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: f64,
    pub max_discount_amount: Option<f64>,
    pub min_order_value: Option<f64>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: i64,
    pub end_date: i64,
    pub is_active: Option<bool>,
}

/// Update discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountUpdate {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub value: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub min_order_value: Option<f64>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub is_active: Option<bool>,
}

/// Apply a code against an order value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountApplyRequest {
    pub code: String,
    pub order_value: f64,
}

/// Result of applying a discount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountApplyResponse {
    pub discount_id: i64,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub order_value: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
}
