//! Order status transitions

use shared::models::{OrderDetail, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{RepoError, discount as discount_repo, order as order_repo, product};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Order with its lines, `OrderNotFound` when missing
pub async fn load_detail(conn: &mut SqliteConnection, id: i64) -> AppResult<OrderDetail> {
    let order = order_repo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let items = order_repo::items(conn, id).await?;
    Ok(OrderDetail { order, items })
}

/// Give back what checkout took: SKU stock and the coupon use
async fn release(conn: &mut SqliteConnection, detail: &OrderDetail) -> AppResult<()> {
    for item in &detail.items {
        product::restore_stock(conn, item.sku_id, item.quantity).await?;
    }
    discount_repo::release_for_order(conn, detail.order.id).await?;
    Ok(())
}

async fn transition(pool: &SqlitePool, id: i64, detail: OrderDetail, next: OrderStatus) -> AppResult<OrderDetail> {
    let current = detail.order.status;
    if !current.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot move order from {} to {}", current.as_str(), next.as_str()),
        )
        .with_detail("from", current.as_str())
        .with_detail("to", next.as_str()));
    }

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    order_repo::transition(&mut *tx, id, current, next).await?;
    if next == OrderStatus::Cancelled {
        release(&mut *tx, &detail).await?;
    }
    let updated = load_detail(&mut *tx, id).await?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id = id,
        from = current.as_str(),
        to = next.as_str(),
        "Order status changed"
    );
    Ok(updated)
}

/// Staff status change along the state machine
pub async fn change_status(pool: &SqlitePool, id: i64, next: OrderStatus) -> AppResult<OrderDetail> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    let detail = load_detail(&mut *conn, id).await?;
    drop(conn);
    transition(pool, id, detail, next).await
}

/// Customer cancellation: only the owner, only while pending.
///
/// Someone else's order reads as not found.
pub async fn cancel_by_customer(pool: &SqlitePool, id: i64, user_id: i64) -> AppResult<OrderDetail> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    let detail = load_detail(&mut *conn, id).await?;
    drop(conn);

    if detail.order.user_id != Some(user_id) {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }
    if detail.order.status != OrderStatus::Pending {
        return Err(AppError::new(ErrorCode::OrderNotCancellable)
            .with_detail("status", detail.order.status.as_str()));
    }
    transition(pool, id, detail, OrderStatus::Cancelled).await
}
