//! Dashboard Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::models::{DashboardPeriod, DashboardSummary, Order, RevenuePoint, StatusCount, TopProduct};

use crate::core::ServerState;
use crate::dashboard;
use crate::utils::extract::{Json, Query};
use crate::utils::AppResult;
use crate::utils::types::LimitParams;

const DEFAULT_TOP_PRODUCTS: u32 = 5;
const DEFAULT_RECENT_ORDERS: u32 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: DashboardPeriod,
}

/// GET /api/dashboard/summary?period=
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<DashboardSummary>> {
    Ok(Json(dashboard::summary(&state.pool, query.period).await?))
}

/// GET /api/dashboard/revenue-chart?period=
pub async fn revenue_chart(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<RevenuePoint>>> {
    let offset = state.config.business_offset_millis();
    Ok(Json(dashboard::revenue_chart(&state.pool, query.period, offset).await?))
}

/// GET /api/dashboard/top-products?period=&limit=
pub async fn top_products(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
    Query(limit): Query<LimitParams>,
) -> AppResult<Json<Vec<TopProduct>>> {
    let limit = limit.limit_or(DEFAULT_TOP_PRODUCTS);
    Ok(Json(dashboard::top_products(&state.pool, query.period, limit).await?))
}

/// GET /api/dashboard/recent-orders?limit=
pub async fn recent_orders(
    State(state): State<ServerState>,
    Query(limit): Query<LimitParams>,
) -> AppResult<Json<Vec<Order>>> {
    let limit = limit.limit_or(DEFAULT_RECENT_ORDERS);
    Ok(Json(dashboard::recent_orders(&state.pool, limit).await?))
}

/// GET /api/dashboard/order-status
pub async fn order_status(State(state): State<ServerState>) -> AppResult<Json<Vec<StatusCount>>> {
    Ok(Json(dashboard::status_breakdown(&state.pool).await?))
}
