//! Administrative units (province / district / ward)

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{District, Province, ResolvedAddress, Ward};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn provinces(pool: &SqlitePool) -> RepoResult<Vec<Province>> {
    let rows = sqlx::query_as::<_, Province>("SELECT code, name FROM province ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn province_exists(pool: &SqlitePool, code: &str) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM province WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

pub async fn districts(pool: &SqlitePool, province_code: &str) -> RepoResult<Vec<District>> {
    let rows = sqlx::query_as::<_, District>(
        "SELECT code, name, province_code FROM district WHERE province_code = ? ORDER BY name",
    )
    .bind(province_code)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn district_exists(pool: &SqlitePool, code: &str) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM district WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

pub async fn wards(pool: &SqlitePool, district_code: &str) -> RepoResult<Vec<Ward>> {
    let rows = sqlx::query_as::<_, Ward>(
        "SELECT code, name, district_code FROM ward WHERE district_code = ? ORDER BY name",
    )
    .bind(district_code)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Resolve codes to names, checking the ward belongs to the district and
/// the district to the province
pub async fn resolve(
    conn: &mut SqliteConnection,
    province_code: &str,
    district_code: &str,
    ward_code: &str,
) -> RepoResult<ResolvedAddress> {
    let province = sqlx::query_scalar::<_, String>("SELECT name FROM province WHERE code = ?")
        .bind(province_code)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::ProvinceNotFound))?;

    let (district, district_province) = sqlx::query_as::<_, (String, String)>(
        "SELECT name, province_code FROM district WHERE code = ?",
    )
    .bind(district_code)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| RepoError::rule(ErrorCode::DistrictNotFound))?;

    let (ward, ward_district) = sqlx::query_as::<_, (String, String)>(
        "SELECT name, district_code FROM ward WHERE code = ?",
    )
    .bind(ward_code)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| RepoError::rule(ErrorCode::WardNotFound))?;

    if district_province != province_code || ward_district != district_code {
        return Err(RepoError::rule(ErrorCode::AddressMismatch));
    }

    Ok(ResolvedAddress {
        province_name: province,
        district_name: district,
        ward_name: ward,
    })
}
