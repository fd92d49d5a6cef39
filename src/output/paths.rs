// src/output/paths.rs
//! Pure functions for path calculations and filename generation.
//!
//! Nothing here touches the filesystem.

use crate::constants::{
    ATTACHMENT_EXTENSION, DOCUMENT_EXTENSION, FILE_DIR, IMAGE_DIR, IMAGE_EXTENSION,
};
use crate::types::NotionId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Replaces the characters most filesystems reject (`\ / * ? : " < > |`)
/// with `_`, then trims surrounding whitespace.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name of the document rendered for a child page titled `title`.
pub fn document_file_name(title: &str) -> String {
    format!("{}.{}", sanitize_filename(title), DOCUMENT_EXTENSION)
}

/// Stem of a downloaded attachment: the caption with whitespace runs
/// collapsed to `_`, or the block id when there is no caption.
pub fn attachment_stem(caption: &str, block_id: &NotionId) -> String {
    if caption.is_empty() {
        return block_id.to_hyphenated();
    }
    let collapsed = WHITESPACE_RUN.replace_all(caption, "_");
    sanitize_filename(&collapsed)
}

/// Where everything produced by one export lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGE_DIR)
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join(FILE_DIR)
    }

    /// Path of a page document.
    pub fn document_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// On-disk destination of the image carried by block `id`.
    pub fn image_path(&self, id: &NotionId) -> PathBuf {
        self.images_dir().join(image_file_name(id))
    }

    /// On-disk destination of an attachment with the given file name.
    pub fn attachment_path(&self, file_name: &str) -> PathBuf {
        self.files_dir().join(file_name)
    }
}

/// `<hyphenated id>.png`
pub fn image_file_name(id: &NotionId) -> String {
    format!("{}.{}", id.to_hyphenated(), IMAGE_EXTENSION)
}

/// `<stem>.pdf`
pub fn attachment_file_name(stem: &str) -> String {
    format!("{}.{}", stem, ATTACHMENT_EXTENSION)
}

/// Link target of an image, relative to any document in the output root.
pub fn image_link(id: &NotionId) -> String {
    format!("{}/{}", IMAGE_DIR, image_file_name(id))
}

/// Link target of an attachment, relative to any document in the output root.
pub fn attachment_link(file_name: &str) -> String {
    format!("{}/{}", FILE_DIR, file_name)
}
