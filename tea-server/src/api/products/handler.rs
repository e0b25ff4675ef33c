//! Product API Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::PaginatedResponse;
use shared::models::{
    Product, ProductCreate, ProductDetail, ProductListItem, ProductUpdate, Sku, SkuCreate, SkuUpdate,
};
use shared::util::slugify;

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::repository::category;
use crate::db::repository::product::{self, ProductFilter, ProductSort};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::types::PaginationParams;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_amount,
    validate_optional_text, validate_required_text, validate_slug,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const MANAGE: &str = "catalog:manage";

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<i64>,
    pub q: Option<String>,
    pub featured: Option<bool>,
    /// newest | price_asc | price_desc | name
    pub sort: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

fn can_manage(user: &MaybeUser) -> bool {
    user.0.as_ref().is_some_and(|u| u.has_permission(MANAGE))
}

/// GET /api/products
pub async fn list(
    State(state): State<ServerState>,
    user: MaybeUser,
    Query(query): Query<ProductListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<ProductListItem>>> {
    let sort = match query.sort.as_deref() {
        None | Some("") => ProductSort::default(),
        Some(value) => ProductSort::parse(value).ok_or_else(|| {
            AppError::validation(format!("Unknown sort order: {}", value)).with_detail("field", "sort")
        })?,
    };
    let filter = ProductFilter {
        category_id: query.category_id,
        q: query.q,
        featured: query.featured,
        include_inactive: query.include_inactive && can_manage(&user),
        sort,
    };

    let (items, total) = product::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    Ok(Json(PaginatedResponse::new(items, total, page.page(), page.limit() as u32)))
}

async fn detail(state: &ServerState, product: Product, manager: bool) -> AppResult<ProductDetail> {
    let category_name = product::category_name(&state.pool, product.category_id).await?;
    let skus = product::find_skus(&state.pool, product.id, !manager).await?;
    Ok(ProductDetail {
        product,
        category_name,
        skus,
    })
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let manager = can_manage(&user);
    let product = product::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active || manager)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(detail(&state, product, manager).await?))
}

/// GET /api/products/slug/{slug}
pub async fn get_by_slug(
    State(state): State<ServerState>,
    user: MaybeUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let manager = can_manage(&user);
    let product = product::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|p| p.is_active || manager)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(detail(&state, product, manager).await?))
}

fn validate_sku(sku: &SkuCreate) -> AppResult<()> {
    validate_required_text(&sku.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&sku.sku_code, "sku_code", MAX_SHORT_TEXT_LEN)?;
    validate_price(sku.price)?;
    if let Some(compare) = sku.compare_at_price {
        validate_amount(compare, "compare_at_price")?;
    }
    validate_stock(sku.stock)?;
    Ok(())
}

fn validate_price(price: f64) -> AppResult<()> {
    validate_amount(price, "price")?;
    if price <= 0.0 {
        return Err(AppError::validation("price must be greater than 0").with_detail("field", "price"));
    }
    Ok(())
}

fn validate_stock(stock: Option<i64>) -> AppResult<()> {
    if stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("stock must not be negative").with_detail("field", "stock"));
    }
    Ok(())
}

async fn ensure_category(state: &ServerState, category_id: i64) -> AppResult<()> {
    if category::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    Ok(())
}

/// POST /api/products - create a product, optionally with its SKUs
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductDetail>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_optional_text(&payload.origin, "origin", MAX_NAME_LEN)?;
    for sku in &payload.skus {
        validate_sku(sku)?;
    }
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(&payload.name),
    };
    validate_slug(&slug)?;
    ensure_category(&state, payload.category_id).await?;

    let product = product::create(&state.pool, &payload, &slug).await?;
    tracing::info!(
        product_id = product.id,
        skus = payload.skus.len(),
        operator_id = current_user.id,
        "Product created"
    );
    Ok(Json(detail(&state, product, true).await?))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductDetail>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(slug) = payload.slug.take() {
        let slug = slug.trim().to_string();
        validate_slug(&slug)?;
        payload.slug = Some(slug);
    }
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    let product = product::update(&state.pool, id, &payload).await?;
    Ok(Json(detail(&state, product, true).await?))
}

/// DELETE /api/products/{id} - hide the product and its SKUs
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    product::deactivate(&state.pool, id).await?;
    tracing::info!(product_id = id, operator_id = current_user.id, "Product deactivated");
    Ok(Json(true))
}

/// POST /api/products/{id}/skus
pub async fn create_sku(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
    Json(payload): Json<SkuCreate>,
) -> AppResult<Json<Sku>> {
    validate_sku(&payload)?;
    if product::find_by_id(&state.pool, product_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    let sku = product::create_sku(&state.pool, product_id, &payload).await?;
    Ok(Json(sku))
}

/// PUT /api/skus/{id}
pub async fn update_sku(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SkuUpdate>,
) -> AppResult<Json<Sku>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(code) = &payload.sku_code {
        validate_required_text(code, "sku_code", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(compare) = payload.compare_at_price {
        validate_amount(compare, "compare_at_price")?;
    }
    validate_stock(payload.stock)?;

    let sku = product::update_sku(&state.pool, id, &payload).await?;
    Ok(Json(sku))
}

/// DELETE /api/skus/{id} - deactivate (order history keeps its snapshots)
pub async fn delete_sku(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    product::deactivate_sku(&state.pool, id).await?;
    Ok(Json(true))
}
