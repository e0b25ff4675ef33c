//! Dashboard reporting
//!
//! Period-over-period comparisons on top of the aggregate queries in
//! [`crate::db::repository::dashboard`].

use chrono::{DateTime, Duration, NaiveDate};
use rust_decimal::Decimal;
use shared::models::{
    DashboardPeriod, DashboardSummary, MetricComparison, Order, OrderStatus, RevenuePoint,
    StatusCount, TopProduct,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db::repository::{dashboard as repo, order as order_repo};
use crate::utils::AppResult;
use crate::utils::money::{round, to_decimal, to_f64};

/// Half-open `[from, to)` window in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: i64,
    pub to: i64,
}

/// Current window ending with `now` (inclusive) and the equally long window before it
pub fn windows(period: DashboardPeriod, now: i64) -> (Window, Window) {
    let len = period.millis();
    let end = now + 1;
    let current = Window { from: end - len, to: end };
    let previous = Window {
        from: end - 2 * len,
        to: end - len,
    };
    (current, previous)
}

/// Percent change from `previous` to `current`, 2 dp.
///
/// A zero baseline reports 0 when nothing happened and 100 otherwise.
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    let current = to_decimal(current);
    let previous = to_decimal(previous);
    to_f64(round((current - previous) / previous * Decimal::ONE_HUNDRED))
}

fn compare(current: f64, previous: f64) -> MetricComparison {
    MetricComparison {
        current,
        previous,
        growth: growth_percent(current, previous),
    }
}

pub async fn summary(pool: &SqlitePool, period: DashboardPeriod) -> AppResult<DashboardSummary> {
    let (cur, prev) = windows(period, now_millis());

    let (revenue, orders) = repo::revenue_and_orders(pool, cur.from, cur.to).await?;
    let (prev_revenue, prev_orders) = repo::revenue_and_orders(pool, prev.from, prev.to).await?;
    let customers = repo::new_customers(pool, cur.from, cur.to).await?;
    let prev_customers = repo::new_customers(pool, prev.from, prev.to).await?;
    let sold = repo::products_sold(pool, cur.from, cur.to).await?;
    let prev_sold = repo::products_sold(pool, prev.from, prev.to).await?;

    Ok(DashboardSummary {
        period,
        revenue: compare(revenue, prev_revenue),
        orders: compare(orders as f64, prev_orders as f64),
        new_customers: compare(customers as f64, prev_customers as f64),
        products_sold: compare(sold as f64, prev_sold as f64),
    })
}

fn business_day(millis: i64, utc_offset_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis + utc_offset_ms).map(|dt| dt.date_naive())
}

/// One point per business day in the window, zero-filled
pub fn fill_days(window: Window, utc_offset_ms: i64, points: Vec<RevenuePoint>) -> Vec<RevenuePoint> {
    let (Some(first), Some(last)) = (
        business_day(window.from, utc_offset_ms),
        business_day(window.to - 1, utc_offset_ms),
    ) else {
        return points;
    };

    let mut filled = Vec::new();
    let mut points = points.into_iter().peekable();
    let mut day = first;
    while day <= last {
        let date = day.format("%Y-%m-%d").to_string();
        match points.next_if(|p| p.date == date) {
            Some(point) => filled.push(point),
            None => filled.push(RevenuePoint {
                date,
                revenue: 0.0,
                orders: 0,
            }),
        }
        day += Duration::days(1);
    }
    filled
}

pub async fn revenue_chart(
    pool: &SqlitePool,
    period: DashboardPeriod,
    utc_offset_ms: i64,
) -> AppResult<Vec<RevenuePoint>> {
    let (cur, _) = windows(period, now_millis());
    let points = repo::revenue_by_day(pool, cur.from, cur.to, utc_offset_ms).await?;
    Ok(fill_days(cur, utc_offset_ms, points))
}

pub async fn top_products(pool: &SqlitePool, period: DashboardPeriod, limit: i64) -> AppResult<Vec<TopProduct>> {
    let (cur, _) = windows(period, now_millis());
    Ok(repo::top_products(pool, cur.from, cur.to, limit).await?)
}

pub async fn recent_orders(pool: &SqlitePool, limit: i64) -> AppResult<Vec<Order>> {
    let (orders, _) = order_repo::list(pool, None, None, None, limit, 0).await?;
    Ok(orders)
}

/// Every status with its count, zero when absent
pub async fn status_breakdown(pool: &SqlitePool) -> AppResult<Vec<StatusCount>> {
    let counts = repo::status_counts(pool).await?;
    Ok(OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: counts
                .iter()
                .find(|c| c.status == status)
                .map(|c| c.count)
                .unwrap_or(0),
        })
        .collect())
}
