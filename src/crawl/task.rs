// src/crawl/task.rs

use crate::constants::{ROOT_FILE_NAME, ROOT_PAGE_TITLE};
use crate::types::NotionId;

/// A page waiting to be exported: where it lives in Notion, the title its
/// document carries, and the file the document is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    pub id: NotionId,
    pub title: String,
    pub file_name: String,
}

impl PageTask {
    pub fn new(id: NotionId, title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            file_name: file_name.into(),
        }
    }

    /// The task the crawl starts from.
    pub fn root(id: NotionId) -> Self {
        Self::new(id, ROOT_PAGE_TITLE, ROOT_FILE_NAME)
    }
}
