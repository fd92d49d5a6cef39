// src/api/types.rs
//! Type definitions for the Notion API module.

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated listing, as Notion reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page: no more results after this one.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// An intermediate page continuing at `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Result of following a cursor to exhaustion.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    /// Number of requests issued to produce `items`.
    pub pages_fetched: u32,
}
