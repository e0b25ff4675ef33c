//! Product Models (SPU + SKU)

use serde::{Deserialize, Serialize};

/// Product (SPU): the catalog entry shown on the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Growing region, e.g. "Thái Nguyên"
    pub origin: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Purchasable variant of a product (package size / price)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sku {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub sku_code: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub stock: i64,
    pub weight_grams: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product list row with category name and price range
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductListItem {
    pub id: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub total_stock: i64,
    pub created_at: i64,
}

/// Product with its SKUs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub skus: Vec<Sku>,
}

/// Create SKU payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuCreate {
    pub name: String,
    pub sku_code: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub stock: Option<i64>,
    pub weight_grams: Option<i64>,
}

/// Update SKU payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuUpdate {
    pub name: Option<String>,
    pub sku_code: Option<String>,
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub stock: Option<i64>,
    pub weight_grams: Option<i64>,
    pub is_active: Option<bool>,
}

/// Create product payload (SKUs may be created in the same request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub category_id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub skus: Vec<SkuCreate>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub origin: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}
