//! Cart Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::CartLine;
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

/// Cart lines of sellable SKUs, oldest first
pub async fn lines(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT ci.sku_id, s.product_id, p.name AS product_name, p.slug AS product_slug, p.image_url, \
                s.name AS sku_name, s.price AS unit_price, s.stock, ci.quantity, \
                CAST(s.price * ci.quantity AS REAL) AS line_total, ci.added_at \
         FROM cart_item ci \
         JOIN sku s ON s.id = ci.sku_id \
         JOIN product p ON p.id = s.product_id \
         WHERE ci.user_id = ? AND s.is_active = 1 AND p.is_active = 1 \
         ORDER BY ci.added_at, ci.sku_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

pub async fn quantity(pool: &SqlitePool, user_id: i64, sku_id: i64) -> RepoResult<Option<i64>> {
    let qty = sqlx::query_scalar::<_, i64>(
        "SELECT quantity FROM cart_item WHERE user_id = ? AND sku_id = ?",
    )
    .bind(user_id)
    .bind(sku_id)
    .fetch_optional(pool)
    .await?;
    Ok(qty)
}

/// Insert or merge into an existing line
pub async fn add(pool: &SqlitePool, user_id: i64, sku_id: i64, quantity: i64) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO cart_item (user_id, sku_id, quantity, added_at) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(user_id, sku_id) DO UPDATE SET quantity = quantity + excluded.quantity",
    )
    .bind(user_id)
    .bind(sku_id)
    .bind(quantity)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_quantity(pool: &SqlitePool, user_id: i64, sku_id: i64, quantity: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE cart_item SET quantity = ? WHERE user_id = ? AND sku_id = ?")
        .bind(quantity)
        .bind(user_id)
        .bind(sku_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::CartItemNotFound));
    }
    Ok(())
}

pub async fn remove(pool: &SqlitePool, user_id: i64, sku_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM cart_item WHERE user_id = ? AND sku_id = ?")
        .bind(user_id)
        .bind(sku_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::CartItemNotFound));
    }
    Ok(())
}

pub async fn clear(conn: &mut SqliteConnection, user_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM cart_item WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}

/// Raw `(sku_id, quantity)` pairs for checkout, including lines whose SKU went inactive
pub async fn checkout_items(conn: &mut SqliteConnection, user_id: i64) -> RepoResult<Vec<(i64, i64)>> {
    let items = sqlx::query_as::<_, (i64, i64)>(
        "SELECT sku_id, quantity FROM cart_item WHERE user_id = ? ORDER BY added_at, sku_id",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}
