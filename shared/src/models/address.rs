//! Vietnamese administrative units (province → district → ward)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Province {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct District {
    pub code: String,
    pub name: String,
    pub province_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ward {
    pub code: String,
    pub name: String,
    pub district_code: String,
}

/// Resolved names for a ward/district/province triple
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ResolvedAddress {
    pub province_name: String,
    pub district_name: String,
    pub ward_name: String,
}
