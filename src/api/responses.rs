// src/api/responses.rs
//! API response types backed by the notion-client object model.
//!
//! Listing results are kept as raw JSON and converted one block at a time,
//! so a block kind notion-client does not know only affects that block.

use super::notion_client_adapter::convert_raw_block;
use super::types::PaginatedResponse;
use crate::error::AppError;
use crate::model::Block;

pub use notion_client::objects::error::Error as NotionError;

/// Block children response with each result still in wire form.
pub type RetrieveBlockChildrenResponse = PaginatedResponse<serde_json::Value>;

impl RetrieveBlockChildrenResponse {
    /// Convert every block of this page, keeping the cursor metadata.
    pub fn into_domain(self) -> Result<PaginatedResponse<Block>, AppError> {
        let results = self
            .results
            .into_iter()
            .map(convert_raw_block)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse {
            object: self.object,
            results,
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        })
    }
}
