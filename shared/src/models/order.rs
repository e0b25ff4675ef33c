//! Order Models

use serde::{Deserialize, Serialize};

use super::ship_config::ShippingQuote;

/// Order lifecycle status
///
/// ```text
/// pending ──► confirmed ──► shipping ──► delivered
///    │            │
///    └──► cancelled ◄┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Shipping)
                | (Shipping, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    pub fn is_cancellable(&self) -> bool {
        self.can_transition_to(OrderStatus::Cancelled)
    }
}

/// Payment method (recorded only, no gateway)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    Cod,
    BankTransfer,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub code: String,
    pub user_id: Option<i64>,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub province_code: String,
    pub province_name: String,
    pub district_code: String,
    pub district_name: String,
    pub ward_code: String,
    pub ward_name: String,
    pub street: String,
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub discount_code: Option<String>,
    pub discount_amount: f64,
    pub shipping_fee: f64,
    pub total: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line snapshot (names and price frozen at checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub sku_id: i64,
    pub product_name: String,
    pub sku_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Requested line at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub sku_id: i64,
    pub quantity: i64,
}

/// Checkout payload
///
/// When `items` is omitted, a logged-in customer's cart is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub province_code: String,
    pub district_code: String,
    pub ward_code: String,
    pub street: String,
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub discount_code: Option<String>,
    pub items: Option<Vec<CheckoutItem>>,
}

/// Price preview payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPreviewRequest {
    pub items: Option<Vec<CheckoutItem>>,
    pub discount_code: Option<String>,
}

/// Priced line in a preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLine {
    pub sku_id: i64,
    pub product_name: String,
    pub sku_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Checkout price breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPreview {
    pub items: Vec<PricedLine>,
    pub subtotal: f64,
    pub discount_code: Option<String>,
    pub discount_amount: f64,
    pub shipping: ShippingQuote,
    pub total: f64,
}

/// Admin status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
