// src/lib.rs
//! notion2markdown library: exports a tree of Notion pages as linked
//! Markdown documents, with images and attachments saved alongside.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ExportConfig`
//! - **Domain model**: `Block` and its per-kind structs
//! - **API client**: `BlockSource`, `NotionHttpClient`, parsers
//! - **Media**: `MediaFetcher`, `HttpMediaFetcher`
//! - **Rendering and crawling**: `DocumentRenderer`, `CrawlScheduler`

pub mod api;
pub mod config;
pub mod constants;
pub mod crawl;
pub mod error;
pub mod formatting;
pub mod media;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig};

// --- Domain Model ---
pub use crate::model::blocks::{
    BulletedListItemBlock, ChildPageBlock, ExternalFile, FileBlock, FileObject, Heading1Block,
    Heading2Block, Heading3Block, ImageBlock, NotionFile, ParagraphBlock, TextBlockContent,
    UnsupportedBlock,
};
pub use crate::model::{Block, BlockCommon};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, RichTextItem, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    fetch_all_blocks,
    parser::parse_blocks_pagination,
    BlockSource, NotionHttpClient, PaginatedResponse,
};

// --- Media ---
pub use crate::media::{HttpMediaFetcher, MediaFetcher};

// --- Rendering and Crawling ---
pub use crate::crawl::{
    CrawlQueue, CrawlReport, CrawlScheduler, CrawlState, PageDiscovery, PageReport, PageTask,
};
pub use crate::formatting::{concat_plain_text, DocumentRenderer, IndentStyle, MediaStats};
pub use crate::output::{OutputLayout, RenderedDocument};
