//! User Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::error::ErrorCode;
use shared::models::{User, UserAdminUpdate, UserRole};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, email, password_hash, full_name, phone, role, is_active, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user_account WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Current `(role, is_active)` for session checks
pub async fn account_status(pool: &SqlitePool, id: i64) -> RepoResult<Option<(UserRole, bool)>> {
    let status = sqlx::query_as::<_, (UserRole, bool)>(
        "SELECT role, is_active FROM user_account WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(status)
}

/// Emails are stored lower-case
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user_account WHERE email = ? LIMIT 1"
    ))
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    full_name: &str,
    phone: Option<&str>,
    role: UserRole,
) -> RepoResult<User> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO user_account (id, email, password_hash, full_name, phone, role, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(email.trim().to_lowercase())
    .bind(password_hash)
    .bind(full_name.trim())
    .bind(phone)
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        RepoError::from(e).on_duplicate(ErrorCode::EmailAlreadyRegistered, "Email is already registered")
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update_password(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user_account SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

pub async fn count_by_role(pool: &SqlitePool, role: UserRole) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_account WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Admin listing, newest first. `q` matches email or name.
pub async fn list(
    pool: &SqlitePool,
    q: Option<&str>,
    role: Option<UserRole>,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<User>, i64)> {
    let pattern = like_pattern(q);
    let filter = "(?1 IS NULL OR email LIKE ?1 ESCAPE '\\' OR full_name LIKE ?1 ESCAPE '\\') AND (?2 IS NULL OR role = ?2)";

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM user_account WHERE {filter}"
    ))
    .bind(&pattern)
    .bind(role)
    .fetch_one(pool)
    .await?;

    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user_account WHERE {filter} ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4"
    ))
    .bind(&pattern)
    .bind(role)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((users, total))
}

pub async fn admin_update(pool: &SqlitePool, id: i64, data: &UserAdminUpdate) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE user_account SET role = COALESCE(?1, role), is_active = COALESCE(?2, is_active), \
         full_name = COALESCE(?3, full_name), phone = COALESCE(?4, phone), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.role)
    .bind(data.is_active)
    .bind(data.full_name.as_deref().map(str::trim))
    .bind(data.phone.as_deref())
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::rule(ErrorCode::NotFound));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
