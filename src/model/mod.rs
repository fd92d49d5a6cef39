//! Domain model of the content a Notion page is made of.
//!
//! Blocks are transient, read-only views: produced per fetch, consumed by
//! the renderer, then dropped.

mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;
