//! Company Info Repository (singleton row id = 1)

use super::{RepoError, RepoResult};
use shared::models::{CompanyInfo, CompanyInfoUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, address, phone, email, tax_code, description, logo_url, \
     facebook_url, zalo_url, business_hours, updated_at";

pub async fn get(pool: &SqlitePool) -> RepoResult<Option<CompanyInfo>> {
    let info =
        sqlx::query_as::<_, CompanyInfo>(&format!("SELECT {COLUMNS} FROM company_info WHERE id = 1"))
            .fetch_optional(pool)
            .await?;
    Ok(info)
}

/// Partial update; the row is created on first write if the seed is missing
pub async fn update(pool: &SqlitePool, data: &CompanyInfoUpdate) -> RepoResult<CompanyInfo> {
    sqlx::query(
        "INSERT INTO company_info (id, name, address, phone, email, tax_code, description, logo_url, \
         facebook_url, zalo_url, business_hours, updated_at) \
         VALUES (1, COALESCE(?1, ''), ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
         ON CONFLICT(id) DO UPDATE SET \
           name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), \
           email = COALESCE(?4, email), tax_code = COALESCE(?5, tax_code), \
           description = COALESCE(?6, description), logo_url = COALESCE(?7, logo_url), \
           facebook_url = COALESCE(?8, facebook_url), zalo_url = COALESCE(?9, zalo_url), \
           business_hours = COALESCE(?10, business_hours), updated_at = ?11",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.address.as_deref())
    .bind(data.phone.as_deref())
    .bind(data.email.as_deref())
    .bind(data.tax_code.as_deref())
    .bind(data.description.as_deref())
    .bind(data.logo_url.as_deref())
    .bind(data.facebook_url.as_deref())
    .bind(data.zalo_url.as_deref())
    .bind(data.business_hours.as_deref())
    .bind(now_millis())
    .execute(pool)
    .await?;

    get(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Company info row missing after update".into()))
}
