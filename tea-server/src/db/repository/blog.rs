//! Blog Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::error::ErrorCode;
use shared::models::Blog;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, slug, summary, content, thumbnail_url, author_id, tags, \
     is_published, published_at, view_count, created_at, updated_at";

/// Filters shared by the public and admin listings
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub q: Option<String>,
    pub tag: Option<String>,
    pub published_only: bool,
}

fn slug_conflict(err: sqlx::Error) -> RepoError {
    RepoError::from(err).on_duplicate(ErrorCode::BlogSlugExists, "Blog slug already exists")
}

/// Newest first (publish time, then creation time for drafts)
pub async fn list(
    pool: &SqlitePool,
    filter: &BlogFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<Blog>, i64)> {
    let pattern = like_pattern(filter.q.as_deref());
    let tag = filter
        .tag
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());
    let where_clause = "WHERE (?1 = 0 OR is_published = 1) \
         AND (?2 IS NULL OR title LIKE ?2 ESCAPE '\\' OR summary LIKE ?2 ESCAPE '\\') \
         AND (?3 IS NULL OR instr(',' || tags || ',', ',' || ?3 || ',') > 0)";

    let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM blog {where_clause}"))
        .bind(filter.published_only)
        .bind(&pattern)
        .bind(&tag)
        .fetch_one(pool)
        .await?;

    let blogs = sqlx::query_as::<_, Blog>(&format!(
        "SELECT {COLUMNS} FROM blog {where_clause} \
         ORDER BY COALESCE(published_at, created_at) DESC, id DESC LIMIT ?4 OFFSET ?5"
    ))
    .bind(filter.published_only)
    .bind(&pattern)
    .bind(&tag)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((blogs, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Blog>> {
    let blog = sqlx::query_as::<_, Blog>(&format!("SELECT {COLUMNS} FROM blog WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(blog)
}

/// Fetch a published post and count the view
pub async fn view_published(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Blog>> {
    let rows = sqlx::query(
        "UPDATE blog SET view_count = view_count + 1 WHERE slug = ? AND is_published = 1",
    )
    .bind(slug)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    let blog = sqlx::query_as::<_, Blog>(&format!("SELECT {COLUMNS} FROM blog WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(blog)
}

/// Row values for insert / update, already normalized by the caller
#[derive(Debug, Clone)]
pub struct BlogWrite {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub thumbnail_url: Option<String>,
    pub tags: String,
    pub is_published: bool,
}

pub async fn create(pool: &SqlitePool, data: &BlogWrite, author_id: Option<i64>) -> RepoResult<Blog> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO blog (id, title, slug, summary, content, thumbnail_url, author_id, tags, \
         is_published, published_at, view_count, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.summary)
    .bind(&data.content)
    .bind(&data.thumbnail_url)
    .bind(author_id)
    .bind(&data.tags)
    .bind(data.is_published)
    .bind(data.is_published.then_some(now))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(slug_conflict)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create blog".into()))
}

/// `published_at` is stamped the first time a post goes live and kept afterwards
pub async fn update(pool: &SqlitePool, id: i64, data: &BlogWrite) -> RepoResult<Blog> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE blog SET title = ?1, slug = ?2, summary = ?3, content = ?4, thumbnail_url = ?5, \
         tags = ?6, is_published = ?7, \
         published_at = CASE WHEN ?7 = 1 AND published_at IS NULL THEN ?8 ELSE published_at END, \
         updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.summary)
    .bind(&data.content)
    .bind(&data.thumbnail_url)
    .bind(&data.tags)
    .bind(data.is_published)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .map_err(slug_conflict)?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::BlogNotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::BlogNotFound))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM blog WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::BlogNotFound));
    }
    Ok(())
}
