//! Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, slug, description, sort_order, is_active, created_at, updated_at";

fn duplicate(err: sqlx::Error) -> RepoError {
    let err = RepoError::from(err);
    let is_slug = matches!(&err, RepoError::Duplicate(msg) if msg.contains("slug"));
    if is_slug {
        err.on_duplicate(ErrorCode::AlreadyExists, "Category slug already exists")
    } else {
        err.on_duplicate(ErrorCode::CategoryNameExists, "Category name already exists")
    }
}

/// Categories ordered by sort_order, active only unless `include_inactive`
pub async fn find_all(pool: &SqlitePool, include_inactive: bool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE (?1 OR is_active = 1) ORDER BY sort_order, name"
    ))
    .bind(include_inactive)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: &CategoryCreate, slug: &str) -> RepoResult<Category> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO category (id, name, slug, description, sort_order, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(slug)
    .bind(&data.description)
    .bind(data.sort_order.unwrap_or(0))
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(duplicate)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &CategoryUpdate) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), slug = COALESCE(?2, slug), \
         description = COALESCE(?3, description), sort_order = COALESCE(?4, sort_order), \
         is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.slug.as_deref())
    .bind(data.description.as_deref())
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await
    .map_err(duplicate)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::CategoryNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::CategoryNotFound))
}

/// Refused while active products reference the category; inactive ones go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let active = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM product WHERE category_id = ? AND is_active = 1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Rule(
            ErrorCode::CategoryHasProducts,
            format!("Category still has {active} active products"),
        ));
    }

    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::CategoryNotFound));
    }
    Ok(())
}
