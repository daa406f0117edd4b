//! Single-mask and batch upload orchestration.
//!
//! `upload_mask` is the "never crash the caller" boundary: encoding and
//! transport failures come back as failure-shaped results, never as
//! errors. The batch walkers build on it with per-mask and per-slice
//! isolation, so one bad mask never aborts the rest of a dataset.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::document::SegmentationDocument;
use crate::error::UploadError;
use crate::export::{to_base64, to_json, to_png, ExportFormat};
use crate::mask::{BinaryMask, Color, RunLengths};
use crate::upload::client::{HttpClient, UploadForm, UPLOAD_PATH};

// =============================================================================
// Options & Results
// =============================================================================

/// Options for a single mask upload.
///
/// `format` and `color` stay as raw strings: they come straight from UI
/// state, and malformed values must surface as failure results rather
/// than panics or type errors upstream of the upload call.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub project_id: String,
    pub frame_index: u32,
    pub slice_index: u32,
    pub class_name: String,
    /// Export format name: "png", "json" or "base64"
    pub format: String,
    /// Overlay color as `#RRGGBB` (unused by the JSON format)
    pub color: String,
}

/// Outcome of one mask upload attempt.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub class_name: String,
    pub success: bool,
    pub s3_url: Option<String>,
    pub filename: Option<String>,
    pub size: Option<usize>,
    pub error: Option<String>,
}

impl UploadResult {
    fn succeeded(class_name: String, s3_url: String, filename: String, size: usize) -> Self {
        Self {
            class_name,
            success: true,
            s3_url: Some(s3_url),
            filename: Some(filename),
            size: Some(size),
            error: None,
        }
    }

    fn failed(class_name: String, error: String) -> Self {
        Self {
            class_name,
            success: false,
            s3_url: None,
            filename: None,
            size: None,
            error: Some(error),
        }
    }
}

/// Options for uploading every mask of one slice.
///
/// Mask dimensions come from the viewer, not the document, so the batch
/// callers must supply them.
#[derive(Debug, Clone)]
pub struct SliceUploadOptions {
    pub project_id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub color: String,
}

/// Options for a whole-document upload.
#[derive(Debug, Clone)]
pub struct BatchUploadOptions {
    pub project_id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub color: String,
    /// Number of slices uploaded in flight at once. 1 reproduces the
    /// strictly sequential behavior; higher values run a bounded pool
    /// while keeping summaries in document order.
    pub concurrency: usize,
}

impl BatchUploadOptions {
    /// Sequential batch options with the given payload settings.
    pub fn sequential(
        project_id: impl Into<String>,
        width: u32,
        height: u32,
        format: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            width,
            height,
            format: format.into(),
            color: color.into(),
            concurrency: 1,
        }
    }
}

/// Aggregate outcome for one slice of a whole-document upload.
///
/// `error` is set only when every attempted mask in the slice failed;
/// partial failures stay visible in the individual `results`.
#[derive(Debug, Clone)]
pub struct SliceUploadSummary {
    pub frame_index: u32,
    pub slice_index: u32,
    pub results: Vec<UploadResult>,
    pub error: Option<String>,
}

// =============================================================================
// Single Upload
// =============================================================================

/// Encode a mask and upload it through the injected client.
///
/// Dispatches on `options.format` to build the payload and the filename
/// `mask_<class>_f<frame>_s<slice>.<ext>`, then posts a multipart form.
/// An unsupported format name is rejected before the client is invoked.
/// All failures are converted into a failure-shaped result; this function
/// never returns an error.
pub async fn upload_mask<C: HttpClient + ?Sized>(
    client: &C,
    mask: &BinaryMask,
    options: &UploadOptions,
) -> UploadResult {
    match try_upload(client, mask, options).await {
        Ok(result) => result,
        Err(e) => {
            warn!(
                class = %options.class_name,
                frame = options.frame_index,
                slice = options.slice_index,
                error = %e,
                "mask upload failed"
            );
            UploadResult::failed(options.class_name.clone(), e.to_string())
        }
    }
}

async fn try_upload<C: HttpClient + ?Sized>(
    client: &C,
    mask: &BinaryMask,
    options: &UploadOptions,
) -> Result<UploadResult, UploadError> {
    // Reject unknown formats before anything touches the client.
    let format: ExportFormat = options.format.parse().map_err(UploadError::Export)?;

    let filename = format!(
        "mask_{}_f{}_s{}.{}",
        options.class_name,
        options.frame_index,
        options.slice_index,
        format.extension()
    );

    let payload = encode_payload(mask, format, options)?;
    let size = payload.len();

    let form = UploadForm {
        payload,
        filename: filename.clone(),
        mime_type: format.mime_type(),
        project_id: options.project_id.clone(),
        frame_index: options.frame_index,
        slice_index: options.slice_index,
        class_name: options.class_name.clone(),
        format: format.name().to_string(),
    };

    let response = client.post(UPLOAD_PATH, form).await?;

    debug!(
        class = %options.class_name,
        filename = %filename,
        s3_url = %response.data.s3_url,
        "mask uploaded"
    );

    Ok(UploadResult::succeeded(
        options.class_name.clone(),
        response.data.s3_url,
        filename,
        size,
    ))
}

fn encode_payload(
    mask: &BinaryMask,
    format: ExportFormat,
    options: &UploadOptions,
) -> Result<Bytes, UploadError> {
    match format {
        ExportFormat::Png => {
            let color: Color = options.color.parse().map_err(crate::error::ExportError::Color)?;
            Ok(to_png(mask, color)?)
        }
        ExportFormat::Base64 => {
            let color: Color = options.color.parse().map_err(crate::error::ExportError::Color)?;
            Ok(Bytes::from(to_base64(mask, color)?))
        }
        ExportFormat::Json => {
            let mut metadata = Map::new();
            metadata.insert(
                "className".to_string(),
                Value::String(options.class_name.clone()),
            );
            metadata.insert("frameIndex".to_string(), options.frame_index.into());
            metadata.insert("sliceIndex".to_string(), options.slice_index.into());

            let record = to_json(mask, metadata);
            let text = serde_json::to_vec(&record).map_err(|e| {
                UploadError::Export(crate::error::ExportError::Encode {
                    message: e.to_string(),
                })
            })?;
            Ok(Bytes::from(text))
        }
    }
}

// =============================================================================
// Per-Slice Batch
// =============================================================================

/// Upload every mask of one slice.
///
/// Masks without RLE contents are skipped silently. A decode or upload
/// failure for one mask is recorded as a failed result and the remaining
/// masks still run. Returns one result per attempted mask, in document
/// order. A missing slice yields an empty list.
pub async fn upload_masks_for_slice<C: HttpClient + ?Sized>(
    client: &C,
    document: &SegmentationDocument,
    frame_index: u32,
    slice_index: u32,
    options: &SliceUploadOptions,
) -> Vec<UploadResult> {
    let Some(slice) = document.slice(frame_index, slice_index) else {
        return Vec::new();
    };

    let mut results = Vec::with_capacity(slice.masks.len());
    for record in &slice.masks {
        let Some(contents) = record.contents.as_deref() else {
            debug!(
                class = %record.class_name,
                frame = frame_index,
                slice = slice_index,
                "mask has no RLE contents, skipping"
            );
            continue;
        };

        let result = match RunLengths::parse(contents) {
            Ok(runs) => {
                let mask = runs.decode(options.width, options.height);
                let upload_options = UploadOptions {
                    project_id: options.project_id.clone(),
                    frame_index,
                    slice_index,
                    class_name: record.class_name.clone(),
                    format: options.format.clone(),
                    color: options.color.clone(),
                };
                upload_mask(client, &mask, &upload_options).await
            }
            Err(e) => {
                warn!(
                    class = %record.class_name,
                    frame = frame_index,
                    slice = slice_index,
                    error = %e,
                    "RLE decode failed"
                );
                UploadResult::failed(record.class_name.clone(), e.to_string())
            }
        };
        results.push(result);
    }
    results
}

// =============================================================================
// Whole-Document Batch
// =============================================================================

/// Upload every mask of every slice in the document.
///
/// Walks every frame × every slice present in the document, skipping
/// slices with no mask records. One summary per visited slice, in
/// document order regardless of concurrency. A failure in one slice never
/// aborts the rest; the batch always runs to completion.
pub async fn upload_all_masks<C: HttpClient + ?Sized>(
    client: &C,
    document: &SegmentationDocument,
    options: &BatchUploadOptions,
) -> Vec<SliceUploadSummary> {
    let slice_options = SliceUploadOptions {
        project_id: options.project_id.clone(),
        width: options.width,
        height: options.height,
        format: options.format.clone(),
        color: options.color.clone(),
    };

    let jobs: Vec<(u32, u32)> = document
        .frames
        .iter()
        .flat_map(|frame| {
            frame
                .slices
                .iter()
                .filter(|slice| !slice.masks.is_empty())
                .map(|slice| (frame.frame_index, slice.slice_index))
        })
        .collect();

    let concurrency = options.concurrency.max(1);

    stream::iter(jobs)
        .map(|(frame_index, slice_index)| {
            let slice_options = &slice_options;
            async move {
                let results =
                    upload_masks_for_slice(client, document, frame_index, slice_index, slice_options)
                        .await;

                // Whole-slice failure: every attempted mask failed.
                let error = if !results.is_empty() && results.iter().all(|r| !r.success) {
                    results.iter().find_map(|r| r.error.clone())
                } else {
                    None
                };

                SliceUploadSummary {
                    frame_index,
                    slice_index,
                    results,
                    error,
                }
            }
        })
        .buffered(concurrency)
        .collect()
        .await
}

// =============================================================================
// Tests
// =============================================================================
