//! Order Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::error::ErrorCode;
use shared::models::{Order, OrderItem, OrderStatus};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, code, user_id, status, customer_name, customer_phone, customer_email, \
     province_code, province_name, district_code, district_name, ward_code, ward_name, street, note, \
     payment_method, subtotal, discount_code, discount_amount, shipping_fee, total, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, order_id, sku_id, product_name, sku_name, unit_price, quantity, line_total";

pub async fn insert(conn: &mut SqliteConnection, o: &Order) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO customer_order ({COLUMNS}) VALUES \
         (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(o.id)
    .bind(&o.code)
    .bind(o.user_id)
    .bind(o.status)
    .bind(&o.customer_name)
    .bind(&o.customer_phone)
    .bind(&o.customer_email)
    .bind(&o.province_code)
    .bind(&o.province_name)
    .bind(&o.district_code)
    .bind(&o.district_name)
    .bind(&o.ward_code)
    .bind(&o.ward_name)
    .bind(&o.street)
    .bind(&o.note)
    .bind(o.payment_method)
    .bind(o.subtotal)
    .bind(&o.discount_code)
    .bind(o.discount_amount)
    .bind(o.shipping_fee)
    .bind(o.total)
    .bind(o.created_at)
    .bind(o.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO order_item ({ITEM_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.sku_id)
    .bind(&item.product_name)
    .bind(&item.sku_name)
    .bind(item.unit_price)
    .bind(item.quantity)
    .bind(item.line_total)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(order)
}

/// Public tracking: both the code and the phone used at checkout must match
pub async fn find_by_code_and_phone(
    pool: &SqlitePool,
    code: &str,
    phone: &str,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE code = ? AND customer_phone = ?"
    ))
    .bind(code.trim().to_uppercase())
    .bind(phone.trim())
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn items(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}

/// Admin listing. `q` matches code, customer name or phone.
pub async fn list(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    q: Option<&str>,
    user_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Order>, i64)> {
    let pattern = like_pattern(q);
    let filter = "(?1 IS NULL OR status = ?1) \
         AND (?2 IS NULL OR code LIKE ?2 ESCAPE '\\' OR customer_name LIKE ?2 ESCAPE '\\' OR customer_phone LIKE ?2 ESCAPE '\\') \
         AND (?3 IS NULL OR user_id = ?3)";

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM customer_order WHERE {filter}"
    ))
    .bind(status)
    .bind(&pattern)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE {filter} \
         ORDER BY created_at DESC, id DESC LIMIT ?4 OFFSET ?5"
    ))
    .bind(status)
    .bind(&pattern)
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((orders, total))
}

/// Move `id` from `from` to `to`; fails if the status changed concurrently
pub async fn transition(
    conn: &mut SqliteConnection,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE customer_order SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .bind(from)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Rule(
            ErrorCode::InvalidStatusTransition,
            format!("Order status changed concurrently, expected {}", from.as_str()),
        ));
    }
    Ok(())
}
