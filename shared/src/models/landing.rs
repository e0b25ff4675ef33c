//! Landing page content sections

use serde::{Deserialize, Serialize};

/// Editable block of the home page, keyed by a short slug (`hero`, `about`...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LandingSection {
    pub key: String,
    pub title: Option<String>,
    /// Free-form JSON object rendered by the storefront
    #[cfg_attr(feature = "db", sqlx(json))]
    pub content: serde_json::Value,
    pub sort_order: i32,
    pub is_visible: bool,
    pub updated_at: i64,
}

/// Upsert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingSectionUpsert {
    pub title: Option<String>,
    pub content: serde_json::Value,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}
