//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Paged list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size > 0 {
            ((total.max(0) as f64) / (page_size as f64)).ceil() as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
