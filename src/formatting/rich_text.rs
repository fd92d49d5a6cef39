// src/formatting/rich_text.rs
//! Flattening rich text runs to plain strings.

use crate::types::RichTextItem;

/// Concatenates the plain text of every run, in order.
pub fn concat_plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
