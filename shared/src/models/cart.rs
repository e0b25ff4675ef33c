//! Cart Models

use serde::{Deserialize, Serialize};

/// One cart line joined with its SKU and product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub sku_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_slug: String,
    pub image_url: Option<String>,
    pub sku_name: String,
    pub unit_price: f64,
    pub stock: i64,
    pub quantity: i64,
    pub line_total: f64,
    pub added_at: i64,
}

/// Cart view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub subtotal: f64,
}

/// Add item payload (merges into an existing line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemAdd {
    pub sku_id: i64,
    pub quantity: i64,
}

/// Set quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i64,
}
