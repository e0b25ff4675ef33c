//! Discount Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::error::ErrorCode;
use shared::models::Discount;
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, code, description, discount_type, value, max_discount_amount, min_order_value, \
     usage_limit, used_count, per_user_limit, start_date, end_date, is_active, created_at, updated_at";

fn code_conflict(err: sqlx::Error) -> RepoError {
    RepoError::from(err).on_duplicate(ErrorCode::DiscountCodeExists, "Discount code already exists")
}

pub async fn list(
    pool: &SqlitePool,
    q: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Discount>, i64)> {
    let pattern = like_pattern(q);
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM discount WHERE (?1 IS NULL OR code LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\')",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let discounts = sqlx::query_as::<_, Discount>(&format!(
        "SELECT {COLUMNS} FROM discount WHERE (?1 IS NULL OR code LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\') \
         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
    ))
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((discounts, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Discount>> {
    let discount =
        sqlx::query_as::<_, Discount>(&format!("SELECT {COLUMNS} FROM discount WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(discount)
}

/// Codes are stored upper-case; lookup is case-insensitive
pub async fn find_by_code(conn: &mut SqliteConnection, code: &str) -> RepoResult<Option<Discount>> {
    let discount =
        sqlx::query_as::<_, Discount>(&format!("SELECT {COLUMNS} FROM discount WHERE code = ?"))
            .bind(code.trim().to_uppercase())
            .fetch_optional(&mut *conn)
            .await?;
    Ok(discount)
}

/// Insert a fully validated discount row
pub async fn create(pool: &SqlitePool, d: &Discount) -> RepoResult<Discount> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO discount (id, code, description, discount_type, value, max_discount_amount, \
         min_order_value, usage_limit, used_count, per_user_limit, start_date, end_date, is_active, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&d.code)
    .bind(&d.description)
    .bind(d.discount_type)
    .bind(d.value)
    .bind(d.max_discount_amount)
    .bind(d.min_order_value)
    .bind(d.usage_limit)
    .bind(d.per_user_limit)
    .bind(d.start_date)
    .bind(d.end_date)
    .bind(d.is_active)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(code_conflict)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create discount".into()))
}

/// Overwrite the editable fields of an existing discount (`used_count` untouched)
pub async fn update(pool: &SqlitePool, d: &Discount) -> RepoResult<Discount> {
    let rows = sqlx::query(
        "UPDATE discount SET code = ?, description = ?, discount_type = ?, value = ?, \
         max_discount_amount = ?, min_order_value = ?, usage_limit = ?, per_user_limit = ?, \
         start_date = ?, end_date = ?, is_active = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&d.code)
    .bind(&d.description)
    .bind(d.discount_type)
    .bind(d.value)
    .bind(d.max_discount_amount)
    .bind(d.min_order_value)
    .bind(d.usage_limit)
    .bind(d.per_user_limit)
    .bind(d.start_date)
    .bind(d.end_date)
    .bind(d.is_active)
    .bind(now_millis())
    .bind(d.id)
    .execute(pool)
    .await
    .map_err(code_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::DiscountNotFound));
    }
    find_by_id(pool, d.id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::DiscountNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM discount WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::DiscountNotFound));
    }
    Ok(())
}

pub async fn user_usage_count(
    conn: &mut SqliteConnection,
    discount_id: i64,
    user_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM discount_usage WHERE discount_id = ? AND user_id = ?",
    )
    .bind(discount_id)
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count)
}

/// Take one use of the global quota; fails once `usage_limit` is reached
pub async fn claim(conn: &mut SqliteConnection, discount_id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE discount SET used_count = used_count + 1 \
         WHERE id = ? AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(discount_id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::DiscountUsageLimitReached));
    }
    Ok(())
}

pub async fn record_usage(
    conn: &mut SqliteConnection,
    discount_id: i64,
    user_id: Option<i64>,
    order_id: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO discount_usage (id, discount_id, user_id, order_id, used_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(snowflake_id())
    .bind(discount_id)
    .bind(user_id)
    .bind(order_id)
    .bind(now_millis())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Give back the uses recorded for an order (cancellation)
pub async fn release_for_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<u64> {
    let discount_ids = sqlx::query_scalar::<_, i64>(
        "DELETE FROM discount_usage WHERE order_id = ? RETURNING discount_id",
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    for discount_id in &discount_ids {
        sqlx::query("UPDATE discount SET used_count = used_count - 1 WHERE id = ? AND used_count > 0")
            .bind(discount_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(discount_ids.len() as u64)
}
