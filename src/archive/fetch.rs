//! Archive retrieval.
//!
//! Fetching is the only error-surfacing boundary of the extractor: a
//! failed download leaves nothing meaningful to return, so it propagates.
//! Everything downstream of the fetch is lenient.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::archive::images::{process_records, ExtractedImages};
use crate::archive::parser::parse_archive;
use crate::error::{ExtractError, FetchError};

/// Transport abstraction for retrieving a byte payload at a URL.
///
/// Implementations must be thread-safe. Timeouts are the implementation's
/// concern.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Fetch the full payload at `url`.
    ///
    /// Must fail with [`FetchError::Status`] when the transport reports a
    /// non-success status.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// `reqwest`-backed [`ArchiveFetcher`].
#[derive(Debug, Clone, Default)]
pub struct HttpArchiveFetcher {
    client: reqwest::Client,
}

impl HttpArchiveFetcher {
    /// Create a fetcher with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Fetch a tar archive and extract its frame/slice-indexed images.
///
/// Fetch failures propagate; everything after the fetch is lenient, so a
/// corrupt archive or a set of non-conforming filenames yields an empty
/// (but successful) result.
pub async fn extract_images_from_url<F: ArchiveFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<ExtractedImages, ExtractError> {
    debug!(url, "fetching image archive");
    let payload = fetcher.fetch(url).await?;

    let records = parse_archive(&payload);
    let extracted = process_records(records);

    info!(
        url,
        archive_bytes = payload.len(),
        images = extracted.len(),
        "image archive extracted"
    );
    Ok(extracted)
}
