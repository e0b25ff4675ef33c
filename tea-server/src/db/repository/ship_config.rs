//! Shipping Config Repository
//!
//! At most one row is active. Every write that activates a config clears
//! the others in the same transaction; the partial unique index
//! `idx_ship_config_single_active` rejects anything that slips through.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{ShipConfig, ShipConfigCreate, ShipConfigUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, name, free_ship_threshold, flat_fee, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ShipConfig>> {
    let configs = sqlx::query_as::<_, ShipConfig>(&format!(
        "SELECT {COLUMNS} FROM ship_config ORDER BY is_active DESC, created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(configs)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ShipConfig>> {
    let config =
        sqlx::query_as::<_, ShipConfig>(&format!("SELECT {COLUMNS} FROM ship_config WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(config)
}

pub async fn find_active(conn: &mut SqliteConnection) -> RepoResult<Option<ShipConfig>> {
    let config = sqlx::query_as::<_, ShipConfig>(&format!(
        "SELECT {COLUMNS} FROM ship_config WHERE is_active = 1 LIMIT 1"
    ))
    .fetch_optional(&mut *conn)
    .await?;
    Ok(config)
}

async fn deactivate_others(conn: &mut SqliteConnection, keep_id: i64, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE ship_config SET is_active = 0, updated_at = ? WHERE is_active = 1 AND id != ?")
        .bind(now)
        .bind(keep_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: &ShipConfigCreate) -> RepoResult<ShipConfig> {
    let id = snowflake_id();
    let now = now_millis();
    let is_active = data.is_active.unwrap_or(false);

    let mut tx = pool.begin().await?;
    if is_active {
        deactivate_others(&mut *tx, id, now).await?;
    }
    sqlx::query(
        "INSERT INTO ship_config (id, name, free_ship_threshold, flat_fee, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.free_ship_threshold)
    .bind(data.flat_fee)
    .bind(is_active)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    if is_active {
        tracing::info!(ship_config_id = id, "Shipping config activated");
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shipping config".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &ShipConfigUpdate) -> RepoResult<ShipConfig> {
    let now = now_millis();
    let mut tx = pool.begin().await?;
    if data.is_active == Some(true) {
        deactivate_others(&mut *tx, id, now).await?;
    }
    let rows = sqlx::query(
        "UPDATE ship_config SET name = COALESCE(?1, name), \
         free_ship_threshold = COALESCE(?2, free_ship_threshold), flat_fee = COALESCE(?3, flat_fee), \
         is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.free_ship_threshold)
    .bind(data.flat_fee)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::ShipConfigNotFound));
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::ShipConfigNotFound))
}

/// Make `id` the only active config
pub async fn activate(pool: &SqlitePool, id: i64) -> RepoResult<ShipConfig> {
    let now = now_millis();
    let mut tx = pool.begin().await?;
    deactivate_others(&mut *tx, id, now).await?;
    let rows = sqlx::query("UPDATE ship_config SET is_active = 1, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        // rollback on drop keeps the previous active config
        return Err(RepoError::rule(ErrorCode::ShipConfigNotFound));
    }
    tx.commit().await?;
    tracing::info!(ship_config_id = id, "Shipping config activated");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::ShipConfigNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM ship_config WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::ShipConfigNotFound));
    }
    Ok(())
}

pub async fn count_active(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ship_config WHERE is_active = 1")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
