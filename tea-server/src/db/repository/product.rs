//! Product (SPU) and SKU Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::error::ErrorCode;
use shared::models::{Product, ProductCreate, ProductListItem, ProductUpdate, Sku, SkuCreate, SkuUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, category_id, name, slug, description, image_url, origin, \
     is_featured, is_active, created_at, updated_at";

const SKU_COLUMNS: &str = "id, product_id, name, sku_code, price, compare_at_price, stock, \
     weight_grams, is_active, created_at, updated_at";

/// Storefront sort orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    fn order_by(&self) -> &'static str {
        match self {
            Self::Newest => "p.created_at DESC, p.id DESC",
            Self::PriceAsc => "min_price IS NULL, min_price ASC, p.id",
            Self::PriceDesc => "min_price IS NULL, min_price DESC, p.id",
            Self::Name => "p.name COLLATE NOCASE ASC, p.id",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<i64>,
    pub q: Option<String>,
    pub featured: Option<bool>,
    /// Admin listings see hidden products and categories
    pub include_inactive: bool,
    pub sort: ProductSort,
}

fn slug_conflict(err: sqlx::Error) -> RepoError {
    RepoError::from(err).on_duplicate(ErrorCode::ProductSlugExists, "Product slug already exists")
}

fn sku_conflict(err: sqlx::Error) -> RepoError {
    RepoError::from(err).on_duplicate(ErrorCode::SkuCodeExists, "SKU code already exists")
}

pub async fn list(
    pool: &SqlitePool,
    filter: &ProductFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<ProductListItem>, i64)> {
    let pattern = like_pattern(filter.q.as_deref());
    let where_clause = "WHERE (?1 OR (p.is_active = 1 AND c.is_active = 1)) \
         AND (?2 IS NULL OR p.category_id = ?2) \
         AND (?3 IS NULL OR p.name LIKE ?3 ESCAPE '\\' OR p.origin LIKE ?3 ESCAPE '\\') \
         AND (?4 IS NULL OR p.is_featured = ?4)";

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM product p JOIN category c ON c.id = p.category_id {where_clause}"
    ))
    .bind(filter.include_inactive)
    .bind(filter.category_id)
    .bind(&pattern)
    .bind(filter.featured)
    .fetch_one(pool)
    .await?;

    let sql = format!(
        "SELECT p.id, p.category_id, c.name AS category_name, p.name, p.slug, p.image_url, p.origin, \
                p.is_featured, p.is_active, \
                (SELECT MIN(s.price) FROM sku s WHERE s.product_id = p.id AND s.is_active = 1) AS min_price, \
                (SELECT MAX(s.price) FROM sku s WHERE s.product_id = p.id AND s.is_active = 1) AS max_price, \
                (SELECT CAST(COALESCE(SUM(s.stock), 0) AS INTEGER) FROM sku s \
                   WHERE s.product_id = p.id AND s.is_active = 1) AS total_stock, \
                p.created_at \
         FROM product p JOIN category c ON c.id = p.category_id \
         {where_clause} ORDER BY {} LIMIT ?5 OFFSET ?6",
        filter.sort.order_by()
    );
    let items = sqlx::query_as::<_, ProductListItem>(&sql)
        .bind(filter.include_inactive)
        .bind(filter.category_id)
        .bind(&pattern)
        .bind(filter.featured)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product WHERE slug = ?"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn category_name(pool: &SqlitePool, category_id: i64) -> RepoResult<Option<String>> {
    let name = sqlx::query_scalar::<_, String>("SELECT name FROM category WHERE id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;
    Ok(name)
}

/// SKUs of a product, cheapest first
pub async fn find_skus(pool: &SqlitePool, product_id: i64, active_only: bool) -> RepoResult<Vec<Sku>> {
    let skus = sqlx::query_as::<_, Sku>(&format!(
        "SELECT {SKU_COLUMNS} FROM sku WHERE product_id = ?1 AND (?2 = 0 OR is_active = 1) ORDER BY price, id"
    ))
    .bind(product_id)
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(skus)
}

pub async fn find_sku(pool: &SqlitePool, id: i64) -> RepoResult<Option<Sku>> {
    let sku = sqlx::query_as::<_, Sku>(&format!("SELECT {SKU_COLUMNS} FROM sku WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(sku)
}

async fn insert_sku(conn: &mut SqliteConnection, product_id: i64, data: &SkuCreate) -> RepoResult<i64> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO sku (id, product_id, name, sku_code, price, compare_at_price, stock, weight_grams, \
         is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(product_id)
    .bind(data.name.trim())
    .bind(data.sku_code.trim())
    .bind(data.price)
    .bind(data.compare_at_price)
    .bind(data.stock.unwrap_or(0))
    .bind(data.weight_grams)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(sku_conflict)?;
    Ok(id)
}

/// Create a product together with its initial SKUs
pub async fn create(pool: &SqlitePool, data: &ProductCreate, slug: &str) -> RepoResult<Product> {
    let id = snowflake_id();
    let now = now_millis();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO product (id, category_id, name, slug, description, image_url, origin, is_featured, \
         is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(data.name.trim())
    .bind(slug)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(&data.origin)
    .bind(data.is_featured.unwrap_or(false))
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(slug_conflict)?;

    for sku in &data.skus {
        insert_sku(&mut *tx, id, sku).await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), \
         slug = COALESCE(?3, slug), description = COALESCE(?4, description), \
         image_url = COALESCE(?5, image_url), origin = COALESCE(?6, origin), \
         is_featured = COALESCE(?7, is_featured), is_active = COALESCE(?8, is_active), \
         updated_at = ?9 WHERE id = ?10",
    )
    .bind(data.category_id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.slug.as_deref())
    .bind(data.description.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.origin.as_deref())
    .bind(data.is_featured)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(slug_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::ProductNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::ProductNotFound))
}

/// Soft delete: hides the product and all its SKUs (order history keeps its snapshots)
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = now_millis();
    let mut tx = pool.begin().await?;
    let rows = sqlx::query("UPDATE product SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::ProductNotFound));
    }
    sqlx::query("UPDATE sku SET is_active = 0, updated_at = ? WHERE product_id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn create_sku(pool: &SqlitePool, product_id: i64, data: &SkuCreate) -> RepoResult<Sku> {
    let mut conn = pool.acquire().await?;
    let id = insert_sku(&mut *conn, product_id, data).await?;
    drop(conn);
    find_sku(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create SKU".into()))
}

pub async fn update_sku(pool: &SqlitePool, id: i64, data: &SkuUpdate) -> RepoResult<Sku> {
    let rows = sqlx::query(
        "UPDATE sku SET name = COALESCE(?1, name), sku_code = COALESCE(?2, sku_code), \
         price = COALESCE(?3, price), compare_at_price = COALESCE(?4, compare_at_price), \
         stock = COALESCE(?5, stock), weight_grams = COALESCE(?6, weight_grams), \
         is_active = COALESCE(?7, is_active), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.sku_code.as_deref().map(str::trim))
    .bind(data.price)
    .bind(data.compare_at_price)
    .bind(data.stock)
    .bind(data.weight_grams)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(sku_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::SkuNotFound));
    }
    find_sku(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::SkuNotFound))
}

pub async fn deactivate_sku(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE sku SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::SkuNotFound));
    }
    Ok(())
}

/// Sellable SKU joined with its product, used to price carts and checkouts
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SellableSku {
    pub sku_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub sku_name: String,
    pub price: f64,
    pub stock: i64,
    pub is_active: bool,
}

pub async fn find_sellable(conn: &mut SqliteConnection, sku_id: i64) -> RepoResult<Option<SellableSku>> {
    let sku = sqlx::query_as::<_, SellableSku>(
        "SELECT s.id AS sku_id, s.product_id, p.name AS product_name, s.name AS sku_name, s.price, s.stock, \
                (s.is_active = 1 AND p.is_active = 1) AS is_active \
         FROM sku s JOIN product p ON p.id = s.product_id WHERE s.id = ?",
    )
    .bind(sku_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(sku)
}

/// Take `quantity` units of stock; fails when the SKU is inactive or short
pub async fn reserve_stock(conn: &mut SqliteConnection, sku_id: i64, quantity: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE sku SET stock = stock - ?1, updated_at = ?2 \
         WHERE id = ?3 AND is_active = 1 AND stock >= ?1",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(sku_id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Rule(
            ErrorCode::InsufficientStock,
            format!("Insufficient stock for SKU {sku_id}"),
        ));
    }
    Ok(())
}

/// Put stock back (cancellation); SKUs deleted since are skipped
pub async fn restore_stock(conn: &mut SqliteConnection, sku_id: i64, quantity: i64) -> RepoResult<()> {
    sqlx::query("UPDATE sku SET stock = stock + ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(now_millis())
        .bind(sku_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
