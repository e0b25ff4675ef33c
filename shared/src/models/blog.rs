//! Blog Model

use serde::{Deserialize, Serialize};

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub thumbnail_url: Option<String>,
    pub author_id: Option<i64>,
    /// Comma separated, lower case
    pub tags: String,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub view_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create blog payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreate {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
}

/// Update blog payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub thumbnail_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}
