// src/formatting/mod.rs
//! Renders Notion blocks into Markdown documents.

pub mod block_renderer;
mod rich_text;

pub use block_renderer::{DocumentRenderer, IndentStyle, MediaStats};
pub use rich_text::concat_plain_text;
