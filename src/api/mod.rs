// src/api/mod.rs
//! Notion API interaction: listing the blocks of a page or block container.
//!
//! Crawl logic depends on [`BlockSource`], never on HTTP details.

pub mod client;
pub mod notion_client_adapter;
pub mod pagination;
pub mod parser;
mod responses;
mod types;

use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;

pub use client::NotionHttpClient;
pub use types::{PaginatedResponse, PaginationResult};

/// The ability to list the direct children of a page or block.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    /// Returns one page of children of `container`, starting at `cursor`.
    async fn list_children(
        &self,
        container: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError>;
}

/// Lists every direct child of `container`, following cursors until the
/// source reports no more results.
pub async fn fetch_all_blocks(
    source: &dyn BlockSource,
    container: &NotionId,
) -> Result<Vec<Block>, AppError> {
    let result = pagination::fetch_all_pages(move |cursor| source.list_children(container, cursor))
        .await?;

    log::debug!(
        "Fetched {} block(s) under {} in {} request(s)",
        result.items.len(),
        container,
        result.pages_fetched
    );

    Ok(result.items)
}
