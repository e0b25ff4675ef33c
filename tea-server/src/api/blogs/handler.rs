//! Blog Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::PaginatedResponse;
use shared::models::{Blog, BlogCreate, BlogUpdate};
use shared::util::slugify;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::blog::{self, BlogFilter, BlogWrite};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::types::PaginationParams;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN,
    validate_optional_text, validate_required_text, validate_slug,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_TAGS: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
}

/// Trim, lowercase and dedupe tags, keeping first-seen order
fn normalize_tags(tags: &[String]) -> Result<String, AppError> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || out.contains(&tag) {
            continue;
        }
        if tag.contains(',') {
            return Err(AppError::validation("tags must not contain commas").with_detail("field", "tags"));
        }
        validate_required_text(&tag, "tags", MAX_SHORT_TEXT_LEN)?;
        out.push(tag);
    }
    if out.len() > MAX_TAGS {
        return Err(AppError::validation(format!("at most {MAX_TAGS} tags")).with_detail("field", "tags"));
    }
    Ok(out.join(","))
}

fn validate_write(data: &BlogWrite) -> Result<(), AppError> {
    validate_required_text(&data.title, "title", MAX_TITLE_LEN)?;
    validate_slug(&data.slug)?;
    validate_required_text(&data.content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&data.summary, "summary", MAX_NOTE_LEN)?;
    validate_optional_text(&data.thumbnail_url, "thumbnail_url", MAX_URL_LEN)?;
    Ok(())
}

async fn list_filtered(
    state: &ServerState,
    query: BlogQuery,
    page: &PaginationParams,
    published_only: bool,
) -> AppResult<Json<PaginatedResponse<Blog>>> {
    let filter = BlogFilter {
        q: query.q,
        tag: query.tag,
        published_only,
    };
    let (blogs, total) = blog::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    Ok(Json(PaginatedResponse::new(blogs, total, page.page(), page.limit() as u32)))
}

/// GET /api/blogs
pub async fn list_published(
    State(state): State<ServerState>,
    Query(query): Query<BlogQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Blog>>> {
    list_filtered(&state, query, &page, true).await
}

/// GET /api/blogs/{slug}
pub async fn view(State(state): State<ServerState>, Path(slug): Path<String>) -> AppResult<Json<Blog>> {
    let post = blog::view_published(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BlogNotFound))?;
    Ok(Json(post))
}

/// GET /api/admin/blogs - drafts included
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<BlogQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Blog>>> {
    list_filtered(&state, query, &page, false).await
}

/// GET /api/admin/blogs/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Blog>> {
    let post = blog::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BlogNotFound))?;
    Ok(Json(post))
}

/// POST /api/admin/blogs
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<BlogCreate>,
) -> AppResult<Json<Blog>> {
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slugify(&payload.title),
    };
    let data = BlogWrite {
        title: payload.title.trim().to_string(),
        slug,
        summary: payload.summary,
        content: payload.content,
        thumbnail_url: payload.thumbnail_url,
        tags: normalize_tags(&payload.tags)?,
        is_published: payload.is_published.unwrap_or(false),
    };
    validate_write(&data)?;

    let post = blog::create(&state.pool, &data, Some(current_user.id)).await?;
    tracing::info!(blog_id = post.id, slug = %post.slug, "Blog post created");
    Ok(Json(post))
}

/// PUT /api/admin/blogs/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BlogUpdate>,
) -> AppResult<Json<Blog>> {
    let existing = blog::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BlogNotFound))?;

    let tags = match &payload.tags {
        Some(tags) => normalize_tags(tags)?,
        None => existing.tags,
    };
    let data = BlogWrite {
        title: payload.title.map(|t| t.trim().to_string()).unwrap_or(existing.title),
        slug: payload.slug.map(|s| s.trim().to_string()).unwrap_or(existing.slug),
        summary: payload.summary.or(existing.summary),
        content: payload.content.unwrap_or(existing.content),
        thumbnail_url: payload.thumbnail_url.or(existing.thumbnail_url),
        tags,
        is_published: payload.is_published.unwrap_or(existing.is_published),
    };
    validate_write(&data)?;

    let post = blog::update(&state.pool, id, &data).await?;
    tracing::info!(blog_id = id, "Blog post updated");
    Ok(Json(post))
}

/// DELETE /api/admin/blogs/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    blog::delete(&state.pool, id).await?;
    tracing::info!(blog_id = id, "Blog post deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![" Oolong ".to_string(), "oolong".into(), "".into(), "Trà Xanh".into()];
        assert_eq!(normalize_tags(&tags).unwrap(), "oolong,trà xanh");
        assert_eq!(normalize_tags(&[]).unwrap(), "");
    }

    #[test]
    fn test_tag_with_comma_rejected() {
        assert!(normalize_tags(&["a,b".to_string()]).is_err());
    }

    #[test]
    fn test_too_many_tags() {
        let tags: Vec<String> = (0..21).map(|i| format!("t{i}")).collect();
        assert!(normalize_tags(&tags).is_err());
    }
}
