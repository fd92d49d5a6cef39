// src/output/writer.rs
//! Performs the actual file I/O for an export.
//!
//! Media downloads write their own files; everything else that lands on
//! disk goes through here.

use super::paths::OutputLayout;
use super::types::RenderedDocument;
use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates the output root and its media subdirectories.
pub fn prepare_layout(layout: &OutputLayout) -> Result<(), AppError> {
    for dir in [
        layout.root().to_path_buf(),
        layout.images_dir(),
        layout.files_dir(),
    ] {
        create_directory(&dir)?;
    }
    Ok(())
}

/// Writes `document` to `<root>/<file_name>`, replacing any existing file.
pub fn write_document(
    layout: &OutputLayout,
    file_name: &str,
    document: &RenderedDocument,
) -> Result<PathBuf, AppError> {
    let path = layout.document_path(file_name);
    let content = document.to_markdown();
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}

fn create_directory(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        }
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    log::debug!("Created directory: {}", path.display());
    Ok(())
}
