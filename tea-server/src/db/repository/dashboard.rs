//! Dashboard aggregates
//!
//! Windows are half-open `[from, to)` in Unix millis. Cancelled orders never count.

use super::RepoResult;
use shared::models::{RevenuePoint, StatusCount, TopProduct};
use sqlx::SqlitePool;

/// (revenue, order count) in a window
pub async fn revenue_and_orders(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<(f64, i64)> {
    let row = sqlx::query_as::<_, (f64, i64)>(
        "SELECT CAST(COALESCE(SUM(total), 0) AS REAL), COUNT(*) FROM customer_order \
         WHERE status != 'cancelled' AND created_at >= ? AND created_at < ?",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn new_customers(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_account WHERE role = 'customer' AND created_at >= ? AND created_at < ?",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn products_sold(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT CAST(COALESCE(SUM(oi.quantity), 0) AS INTEGER) FROM order_item oi \
         JOIN customer_order o ON o.id = oi.order_id \
         WHERE o.status != 'cancelled' AND o.created_at >= ? AND o.created_at < ?",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Revenue per business day; days without orders are absent
pub async fn revenue_by_day(
    pool: &SqlitePool,
    from: i64,
    to: i64,
    utc_offset_ms: i64,
) -> RepoResult<Vec<RevenuePoint>> {
    let points = sqlx::query_as::<_, RevenuePoint>(
        "SELECT date((created_at + ?1) / 1000, 'unixepoch') AS date, \
                CAST(COALESCE(SUM(total), 0) AS REAL) AS revenue, COUNT(*) AS orders \
         FROM customer_order \
         WHERE status != 'cancelled' AND created_at >= ?2 AND created_at < ?3 \
         GROUP BY 1 ORDER BY 1",
    )
    .bind(utc_offset_ms)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(points)
}

pub async fn top_products(pool: &SqlitePool, from: i64, to: i64, limit: i64) -> RepoResult<Vec<TopProduct>> {
    let products = sqlx::query_as::<_, TopProduct>(
        "SELECT s.product_id AS product_id, COALESCE(p.name, MAX(oi.product_name)) AS product_name, \
                CAST(SUM(oi.quantity) AS INTEGER) AS quantity_sold, \
                CAST(SUM(oi.line_total) AS REAL) AS revenue \
         FROM order_item oi \
         JOIN customer_order o ON o.id = oi.order_id \
         LEFT JOIN sku s ON s.id = oi.sku_id \
         LEFT JOIN product p ON p.id = s.product_id \
         WHERE o.status != 'cancelled' AND o.created_at >= ?1 AND o.created_at < ?2 \
         GROUP BY s.product_id, CASE WHEN s.product_id IS NULL THEN oi.product_name END \
         ORDER BY quantity_sold DESC, revenue DESC, product_name \
         LIMIT ?3",
    )
    .bind(from)
    .bind(to)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// All-time counts, only statuses that occur
pub async fn status_counts(pool: &SqlitePool) -> RepoResult<Vec<StatusCount>> {
    let counts = sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM customer_order GROUP BY status",
    )
    .fetch_all(pool)
    .await?;
    Ok(counts)
}
