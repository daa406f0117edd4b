//! Injected HTTP client seam.
//!
//! The codec never talks to the network directly: it builds an
//! [`UploadForm`] and hands it to whatever [`HttpClient`] the caller
//! injects. [`ReqwestUploadClient`] is the production implementation;
//! tests inject mocks. Timeouts and retries are the client's concern,
//! not the codec's.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::UploadError;

/// Remote path mask uploads are posted to.
pub const UPLOAD_PATH: &str = "/upload";

// =============================================================================
// UploadForm
// =============================================================================

/// A multipart upload body: one file part plus the metadata fields the
/// backend expects (`projectId`, `frameIndex`, `sliceIndex`, `className`,
/// `format`).
#[derive(Debug, Clone)]
pub struct UploadForm {
    /// Encoded mask payload (PNG bytes, JSON text, or a base64 data URI)
    pub payload: Bytes,

    /// Filename reported in the file part
    pub filename: String,

    /// MIME type of the payload
    pub mime_type: &'static str,

    pub project_id: String,
    pub frame_index: u32,
    pub slice_index: u32,
    pub class_name: String,

    /// Canonical export format name
    pub format: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response envelope from the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub data: UploadData,
}

/// Payload of a successful upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadData {
    /// Storage location the backend reports for the uploaded mask
    #[serde(rename = "s3Url")]
    pub s3_url: String,

    /// Any additional fields the backend includes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// HttpClient
// =============================================================================

/// Transport abstraction for mask uploads.
///
/// Implementations must be thread-safe. The codec only needs `post` to
/// accept a multipart-style body and resolve with a response exposing
/// `data.s3Url`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Post a multipart form to `path` on the backend.
    async fn post(&self, path: &str, form: UploadForm) -> Result<UploadResponse, UploadError>;
}

// =============================================================================
// ReqwestUploadClient
// =============================================================================

/// `reqwest`-backed [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ReqwestUploadClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestUploadClient {
    /// Create a client posting to the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpClient for ReqwestUploadClient {
    async fn post(&self, path: &str, form: UploadForm) -> Result<UploadResponse, UploadError> {
        let file_part = reqwest::multipart::Part::bytes(form.payload.to_vec())
            .file_name(form.filename.clone())
            .mime_str(form.mime_type)
            .map_err(|e| UploadError::Http(e.to_string()))?;

        let body = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("projectId", form.project_id)
            .text("frameIndex", form.frame_index.to_string())
            .text("sliceIndex", form.slice_index.to_string())
            .text("className", form.class_name)
            .text("format", form.format);

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .multipart(body)
            .send()
            .await
            .map_err(|e| UploadError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Http(format!("HTTP {status} from {url}")));
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))
    }
}
