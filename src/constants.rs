// src/constants.rs
//! Domain constants that define the operational boundaries of the exporter.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you the shape of the produced file tree and how the
//! crawler talks to Notion.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many blocks the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while paginating a page's children.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Notion API version pinned in every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Production base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// Default root of the exported tree.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Title given to the root page's document.
pub const ROOT_PAGE_TITLE: &str = "index";

/// File name of the root page's document.
pub const ROOT_FILE_NAME: &str = "index.md";

/// Subdirectory (relative to the output root) holding downloaded images.
pub const IMAGE_DIR: &str = "images";

/// Subdirectory (relative to the output root) holding downloaded attachments.
pub const FILE_DIR: &str = "files";

/// Extension of every rendered page document.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Extension given to downloaded images, whatever their real format.
pub const IMAGE_EXTENSION: &str = "png";

/// Extension given to downloaded attachments.
pub const ATTACHMENT_EXTENSION: &str = "pdf";

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Upper bound on a single image or attachment download.
pub const MEDIA_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters of a media URL shown in failure logs. Hosted file URLs carry
/// long signed query strings that are useless in a log line.
pub const MEDIA_URL_PREVIEW_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Indentation unit applied per nesting level when nested indentation is on.
pub const INDENT_UNIT: &str = "    ";

/// Boilerplate navigation phrases. A heading or paragraph containing any of
/// them is dropped from the output.
pub const SKIPPED_PHRASES: &[&str] = &[
    "トップページに戻る",
    "トップページへ戻る",
    "TOPへ戻る",
    "目次へ戻る",
];

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
