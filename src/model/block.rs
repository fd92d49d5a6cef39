use super::blocks::*;
use super::common::BlockCommon;
use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::File($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// The block kinds the exporter understands, plus an explicit catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    Image(ImageBlock),
    File(FileBlock),
    ChildPage(ChildPageBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &NotionId {
        &self.common().id
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::Image(_) => "image",
            Block::File(_) => "file",
            Block::ChildPage(_) => "child_page",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Whether this block's children belong to another document.
    ///
    /// A child page's blocks are rendered into the child's own file, never
    /// inline into the parent.
    pub fn owns_separate_document(&self) -> bool {
        matches!(self, Block::ChildPage(_))
    }
}
