//! Company Info Model

use serde::{Deserialize, Serialize};

/// Company information (singleton, id = 1)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CompanyInfo {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_code: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub facebook_url: Option<String>,
    pub zalo_url: Option<String>,
    pub business_hours: Option<String>,
    pub updated_at: i64,
}

/// Update company info payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfoUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_code: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub facebook_url: Option<String>,
    pub zalo_url: Option<String>,
    pub business_hours: Option<String>,
}
