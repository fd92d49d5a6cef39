// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.
//!
//! Only the block kinds the exporter renders get a dedicated variant; every
//! other kind keeps its id, its `has_children` flag and its type name so the
//! renderer can still expand its children. That includes kinds notion-client
//! cannot deserialize at all, which are read straight from the raw JSON.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::{NotionId, RichTextItem};

/// Convert one raw block from a children listing.
///
/// Blocks notion-client rejects become [`Block::Unsupported`] instead of
/// failing the whole listing.
pub fn convert_raw_block(raw: Value) -> Result<Block, AppError> {
    match notion_client::objects::block::Block::deserialize(&raw) {
        Ok(notion_block) => convert_block(notion_block),
        Err(err) => {
            let block = unsupported_from_raw(&raw)?;
            if is_rendered_kind(block.block_type()) {
                log::warn!(
                    "Could not read {} block {}, leaving it out: {}",
                    block.block_type(),
                    block.id(),
                    err
                );
            } else {
                log::debug!(
                    "Unknown block kind {} ({}): {}",
                    block.block_type(),
                    block.id(),
                    err
                );
            }
            Ok(block)
        }
    }
}

/// Keeps what the crawl needs from a block notion-client could not read.
fn unsupported_from_raw(raw: &Value) -> Result<Block, AppError> {
    let raw_id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;

    let block_type = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unsupported")
        .to_string();

    Ok(Block::Unsupported(UnsupportedBlock {
        common: BlockCommon {
            id: NotionId::parse(raw_id)?,
            has_children: raw
                .get("has_children")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        block_type,
    }))
}

fn is_rendered_kind(block_type: &str) -> bool {
    matches!(
        block_type,
        "paragraph"
            | "heading_1"
            | "heading_2"
            | "heading_3"
            | "bulleted_list_item"
            | "child_page"
            | "image"
            | "file"
    )
}

/// Convert notion-client Block to our domain Block
pub fn convert_block(
    notion_block: notion_client::objects::block::Block,
) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    use notion_client::objects::block::BlockType;

    match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Ok(Block::Paragraph(ParagraphBlock {
            common,
            content: convert_text_block_content(paragraph.rich_text),
        })),

        BlockType::Heading1 { heading_1 } => Ok(Block::Heading1(Heading1Block {
            common,
            content: convert_text_block_content(heading_1.rich_text),
        })),

        BlockType::Heading2 { heading_2 } => Ok(Block::Heading2(Heading2Block {
            common,
            content: convert_text_block_content(heading_2.rich_text),
        })),

        BlockType::Heading3 { heading_3 } => Ok(Block::Heading3(Heading3Block {
            common,
            content: convert_text_block_content(heading_3.rich_text),
        })),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Ok(Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: convert_text_block_content(bulleted_list_item.rich_text),
            }))
        }

        BlockType::ChildPage { child_page } => Ok(Block::ChildPage(ChildPageBlock {
            common,
            title: child_page.title,
        })),

        BlockType::Image { image } => Ok(Block::Image(ImageBlock {
            common,
            image: convert_file_object(image.file_type),
        })),

        BlockType::File { file } => Ok(Block::File(FileBlock {
            common,
            file: convert_file_object(file.file_type),
            caption: convert_rich_text_array(file.caption),
        })),

        _ => Ok(Block::Unsupported(UnsupportedBlock {
            common,
            block_type: block_type_name(&format!("{:?}", notion_block.block_type)),
        })),
    }
}

/// Turns the debug rendering of a `BlockType` variant (`ColumnList { .. }`)
/// into the API's snake_case type name (`column_list`).
fn block_type_name(debug_repr: &str) -> String {
    let variant: String = debug_repr
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();

    let mut name = String::with_capacity(variant.len() + 4);
    for (i, c) in variant.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }

    if name.is_empty() {
        "unsupported".to_string()
    } else {
        name
    }
}

/// Convert block common fields
fn convert_block_common(
    notion_block: &notion_client::objects::block::Block,
) -> Result<BlockCommon, AppError> {
    let raw_id = notion_block
        .id
        .clone()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;

    Ok(BlockCommon {
        id: NotionId::parse(&raw_id)?,
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

fn convert_text_block_content(
    rich_text: Vec<notion_client::objects::rich_text::RichText>,
) -> TextBlockContent {
    TextBlockContent::new(convert_rich_text_array(rich_text))
}

/// Convert array of rich text items
fn convert_rich_text_array(
    rich_texts: Vec<notion_client::objects::rich_text::RichText>,
) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

/// Convert single rich text item, keeping only what the exporter renders.
fn convert_rich_text(rich_text: notion_client::objects::rich_text::RichText) -> RichTextItem {
    use notion_client::objects::rich_text::RichText as NcRichText;

    match rich_text {
        NcRichText::Text {
            text,
            plain_text,
            href,
            ..
        } => RichTextItem {
            plain_text: plain_text.unwrap_or(text.content),
            href,
        },

        NcRichText::Mention {
            plain_text, href, ..
        } => RichTextItem { plain_text, href },

        NcRichText::Equation {
            plain_text, href, ..
        } => RichTextItem { plain_text, href },

        #[allow(unreachable_patterns)]
        _ => {
            log::debug!("Unsupported rich text type, rendering as empty run");
            RichTextItem::default()
        }
    }
}

/// Convert file object from notion-client to our domain type
fn convert_file_object(file: notion_client::objects::file::File) -> FileObject {
    use notion_client::objects::file::File as NcFile;

    match file {
        NcFile::External { external } => FileObject::External {
            external: ExternalFile { url: external.url },
        },
        NcFile::File { file } => FileObject::File {
            file: NotionFile {
                url: file.url,
                expiry_time: Some(file.expiry_time),
            },
        },
    }
}
