use super::common::BlockCommon;
use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// Text content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 1 block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Heading1Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 2 block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Heading2Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 3 block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Heading3Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Bulleted list item block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Child page block: a link to another full page, which becomes its own
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Image block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub image: FileObject,
}

/// File attachment block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    pub common: BlockCommon,
    pub file: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// Any block kind the exporter does not render. Its children are still
/// expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// File object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    /// URL of the binary payload, whichever way it is hosted.
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }

    /// Shorthand for an externally hosted file.
    pub fn external(url: impl Into<String>) -> Self {
        FileObject::External {
            external: ExternalFile { url: url.into() },
        }
    }

    /// Shorthand for a Notion-hosted file without a known expiry.
    pub fn hosted(url: impl Into<String>) -> Self {
        FileObject::File {
            file: NotionFile {
                url: url.into(),
                expiry_time: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A Notion-hosted file. The URL is signed and stops working after
/// `expiry_time`, so it must be downloaded during the same crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}
