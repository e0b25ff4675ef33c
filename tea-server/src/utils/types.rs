//! Shared Types
//!
//! Query parameter types used across handlers

use serde::Deserialize;

const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Calculate offset for SQL queries
    pub fn offset(&self) -> i64 {
        ((self.page() - 1) as i64) * self.limit()
    }

    /// Get limit for SQL queries (1..=100)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE) as i64
    }
}

/// `?limit=` for dashboard lists
#[derive(Debug, Clone, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

impl LimitParams {
    pub fn limit_or(&self, default: u32) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE) as i64
    }
}
