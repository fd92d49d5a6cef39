// src/media/fetcher.rs
//! HTTP-backed media fetcher streaming response bodies straight to disk.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};

use super::{url_preview, MediaFetcher};
use crate::error::AppError;
use crate::types::ValidatedUrl;

/// Reasons a single download fails. Never leaves this module.
#[derive(Debug, Error)]
enum MediaError {
    #[error(transparent)]
    InvalidUrl(#[from] crate::types::ValidationError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Downloads media over HTTP with a per-request time limit.
#[derive(Clone)]
pub struct HttpMediaFetcher {
    client: Client,
}

impl HttpMediaFetcher {
    /// Builds a fetcher whose requests give up after `timeout`, body included.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn try_download(&self, url: &str, destination: &Path) -> Result<u64, MediaError> {
        let url = ValidatedUrl::parse(url)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }

        let response = self.client.get(url.into_inner()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Status(status));
        }

        let mut file = fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    drop(file);
                    let _ = fs::remove_file(destination).await;
                    return Err(err.into());
                }
            };

            if let Err(err) = file.write_all(&chunk).await {
                drop(file);
                let _ = fs::remove_file(destination).await;
                return Err(err.into());
            }
            written += chunk.len() as u64;
        }

        if let Err(err) = file.flush().await {
            drop(file);
            let _ = fs::remove_file(destination).await;
            return Err(err.into());
        }
        Ok(written)
    }
}

#[async_trait::async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn download(&self, url: &str, destination: &Path) -> bool {
        match self.try_download(url, destination).await {
            Ok(bytes) => {
                log::debug!("Saved {} ({} bytes)", destination.display(), bytes);
                true
            }
            Err(err) => {
                log::warn!(
                    "Could not download {} to {}: {}",
                    url_preview(url),
                    destination.display(),
                    err
                );
                false
            }
        }
    }
}
