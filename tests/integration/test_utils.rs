//! Shared test utilities: hand-built tar archives, segmentation document
//! builders, and a mock HTTP client with injectable failures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Map;

use cinemask::{
    document::{Frame, MaskRecord, SegmentationDocument, Slice},
    error::UploadError,
    upload::{HttpClient, UploadData, UploadForm, UploadResponse},
};

// =============================================================================
// Tar Builders
// =============================================================================

/// Tar block size (header and alignment unit).
pub const BLOCK: usize = 512;

/// Build a 512-byte tar header for an entry.
pub fn tar_header(name: &str, size: usize, typeflag: u8) -> [u8; BLOCK] {
    let mut header = [0u8; BLOCK];
    header[..name.len()].copy_from_slice(name.as_bytes());

    // Size field: 11 octal digits plus NUL at bytes 124..136.
    let octal = format!("{size:011o}");
    header[124..124 + octal.len()].copy_from_slice(octal.as_bytes());

    header[156] = typeflag;
    header
}

/// Build a tar archive from (name, payload) regular-file entries, with
/// block padding and two terminating zero blocks.
pub fn tar_archive(entries: &[(&str, &[u8])]) -> Bytes {
    let mut buf = Vec::new();
    for (name, payload) in entries {
        buf.extend_from_slice(&tar_header(name, payload.len(), b'0'));
        buf.extend_from_slice(payload);
        let padded = payload.len().div_ceil(BLOCK) * BLOCK;
        buf.extend(std::iter::repeat(0u8).take(padded - payload.len()));
    }
    buf.extend_from_slice(&[0u8; BLOCK]);
    buf.extend_from_slice(&[0u8; BLOCK]);
    Bytes::from(buf)
}

// =============================================================================
// Document Builders
// =============================================================================

/// Build a mask record with RLE contents.
pub fn mask_record(class_name: &str, contents: &str) -> MaskRecord {
    MaskRecord {
        class_name: class_name.to_string(),
        contents: Some(contents.to_string()),
        confidence: Some(0.9),
    }
}

/// Build a document with `frames x slices` slices, each holding a single
/// "LV" mask covering a 3x3 grid.
pub fn grid_document(frames: u32, slices: u32) -> SegmentationDocument {
    SegmentationDocument {
        frames: (0..frames)
            .map(|frame_index| Frame {
                frame_index,
                slices: (0..slices)
                    .map(|slice_index| Slice {
                        slice_index,
                        masks: vec![mask_record("LV", "3,4,2")],
                    })
                    .collect(),
            })
            .collect(),
    }
}

// =============================================================================
// Mock HTTP Client
// =============================================================================

/// Mock upload client: records every received form, fails uploads whose
/// `(frame, slice)` pair was marked as failing.
#[derive(Default)]
pub struct MockClient {
    calls: AtomicUsize,
    pub forms: Mutex<Vec<UploadForm>>,
    fail_at: Vec<(u32, u32)>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(fail_at: Vec<(u32, u32)>) -> Self {
        Self {
            fail_at,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn post(&self, _path: &str, form: UploadForm) -> Result<UploadResponse, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (form.frame_index, form.slice_index);
        let filename = form.filename.clone();
        self.forms.lock().unwrap().push(form);

        if self.fail_at.contains(&key) {
            return Err(UploadError::Http(format!(
                "injected failure for f{} s{}",
                key.0, key.1
            )));
        }

        Ok(UploadResponse {
            data: UploadData {
                s3_url: format!("s3://masks/{filename}"),
                extra: Map::new(),
            },
        })
    }
}
