// src/output/mod.rs
//! The exported file tree: naming, layout and writing.
//!
//! Path planning in [`paths`] is pure; [`writer`] performs the I/O.

pub mod paths;
mod types;
mod writer;

pub use paths::{
    attachment_file_name, attachment_link, attachment_stem, document_file_name, image_link,
    sanitize_filename, OutputLayout,
};
pub use types::RenderedDocument;
pub use writer::{prepare_layout, write_document};
