//! Landing page sections

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{LandingSection, LandingSectionUpsert};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "key, title, content, sort_order, is_visible, updated_at";

pub async fn find_all(pool: &SqlitePool, visible_only: bool) -> RepoResult<Vec<LandingSection>> {
    let sections = sqlx::query_as::<_, LandingSection>(&format!(
        "SELECT {COLUMNS} FROM landing_section WHERE (?1 = 0 OR is_visible = 1) ORDER BY sort_order, key"
    ))
    .bind(visible_only)
    .fetch_all(pool)
    .await?;
    Ok(sections)
}

pub async fn find_by_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<LandingSection>> {
    let section = sqlx::query_as::<_, LandingSection>(&format!(
        "SELECT {COLUMNS} FROM landing_section WHERE key = ?"
    ))
    .bind(key)
    .fetch_optional(pool)
    .await?;
    Ok(section)
}

/// Insert or replace the content of a section; omitted sort/visibility keep their values
pub async fn upsert(pool: &SqlitePool, key: &str, data: &LandingSectionUpsert) -> RepoResult<LandingSection> {
    let content = serde_json::to_string(&data.content)
        .map_err(|e| RepoError::Validation(format!("Invalid section content: {e}")))?;

    sqlx::query(
        "INSERT INTO landing_section (key, title, content, sort_order, is_visible, updated_at) \
         VALUES (?1, ?2, ?3, COALESCE(?4, 0), COALESCE(?5, 1), ?6) \
         ON CONFLICT(key) DO UPDATE SET title = ?2, content = ?3, \
           sort_order = COALESCE(?4, sort_order), is_visible = COALESCE(?5, is_visible), updated_at = ?6",
    )
    .bind(key)
    .bind(data.title.as_deref())
    .bind(content)
    .bind(data.sort_order)
    .bind(data.is_visible)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_key(pool, key)
        .await?
        .ok_or_else(|| RepoError::rule(ErrorCode::LandingSectionNotFound))
}

pub async fn delete(pool: &SqlitePool, key: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM landing_section WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::LandingSectionNotFound));
    }
    Ok(())
}
