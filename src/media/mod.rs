// src/media/mod.rs
//! Downloading images and attachments referenced by rendered pages.
//!
//! Media is best effort: a download that fails for any reason is logged and
//! reported as `false`, and the crawl carries on.

mod fetcher;

use std::path::Path;

pub use fetcher::HttpMediaFetcher;

/// The ability to save the resource behind a URL to a local file.
#[async_trait::async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Saves `url` to `destination`, creating parent directories as needed.
    ///
    /// Returns whether the file was written in full. Never fails.
    async fn download(&self, url: &str, destination: &Path) -> bool;
}

/// Shortens a media URL for log lines. Hosted file URLs carry long signed
/// query strings.
pub(crate) fn url_preview(url: &str) -> String {
    use crate::constants::MEDIA_URL_PREVIEW_LENGTH;

    if url.chars().count() > MEDIA_URL_PREVIEW_LENGTH {
        let cut: String = url.chars().take(MEDIA_URL_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        url.to_string()
    }
}
