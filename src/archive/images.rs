//! Image indexing and handle lifecycle.
//!
//! Extracted image records follow the naming convention
//! `<anything>_<frameIndex>_<sliceIndex>.<jpg|jpeg|png>`. This module
//! recovers those indices, stores the payloads behind stable handles,
//! and answers "closest available image" queries over the resulting
//! time × depth grid.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::archive::parser::TarRecord;

/// Accepted image filename extensions (lowercase).
const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Minimum `_`-separated segments required to carry frame/slice indices:
/// at least one name segment, the frame, and the slice-with-extension.
const MIN_NAME_SEGMENTS: usize = 3;

// =============================================================================
// ProcessedImage
// =============================================================================

/// An extracted image addressed by its `(frame, slice)` grid position.
///
/// `url` is a stable handle into the [`ExtractedImages`] store that
/// produced the image; it stops resolving once the store is disposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// Original entry name from the archive
    pub name: String,

    /// Cine frame (time) index
    pub frame: u32,

    /// Slice (depth) index
    pub slice: u32,

    /// Stable handle resolving to the payload bytes
    pub url: String,

    /// Payload size in bytes
    pub size: usize,
}

// =============================================================================
// ExtractedImages
// =============================================================================

/// The result of extracting images from an archive: an index sorted by
/// `(frame, slice)` plus the store owning every payload.
///
/// Ownership of the payloads transfers to this value; callers are
/// responsible for calling [`dispose_all`](Self::dispose_all) once
/// display is complete. Disposal is explicit and idempotent.
#[derive(Debug, Default)]
pub struct ExtractedImages {
    /// Extracted images in ascending `(frame, slice)` order
    pub images: Vec<ProcessedImage>,
    store: HashMap<String, Bytes>,
}

impl ExtractedImages {
    /// Resolve an image handle to its payload bytes.
    ///
    /// Returns `None` for foreign handles and after disposal.
    pub fn data(&self, image: &ProcessedImage) -> Option<&Bytes> {
        self.store.get(&image.url)
    }

    /// Number of extracted images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether extraction matched no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Release every payload handle.
    ///
    /// After disposal, [`data`](Self::data) returns `None` for every
    /// image. Calling this more than once is a no-op.
    pub fn dispose_all(&mut self) {
        self.store.clear();
    }
}

/// Filter tar records for images, index them by filename, and build the
/// handle store.
///
/// Records that are not images, or whose names don't carry parseable
/// frame/slice indices, are dropped with a diagnostic; extraction as a
/// whole always succeeds even when nothing matches.
pub fn process_records(records: Vec<TarRecord>) -> ExtractedImages {
    let mut images = Vec::new();
    let mut store = HashMap::new();

    for (counter, record) in records.into_iter().enumerate() {
        if !is_image_name(&record.name) {
            debug!(name = %record.name, "not an image entry, skipping");
            continue;
        }

        let Some((frame, slice)) = frame_slice_from_name(&record.name) else {
            warn!(
                name = %record.name,
                "image name does not follow the _<frame>_<slice> convention, dropping"
            );
            continue;
        };

        let url = format!("mem://{counter}");
        store.insert(url.clone(), record.data);
        images.push(ProcessedImage {
            name: record.name,
            frame,
            slice,
            url,
            size: record.size,
        });
    }

    images.sort_by_key(|img| (img.frame, img.slice));

    ExtractedImages { images, store }
}

/// Whether an entry name has an accepted image extension
/// (case-insensitive).
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Recover `(frame, slice)` from an image entry name.
///
/// Splits the name on `_` and requires at least three segments; the
/// second-to-last segment is the frame index and the last segment minus
/// its extension is the slice index, both base-10.
pub fn frame_slice_from_name(name: &str) -> Option<(u32, u32)> {
    let segments: Vec<&str> = name.split('_').collect();
    if segments.len() < MIN_NAME_SEGMENTS {
        return None;
    }

    let frame: u32 = segments[segments.len() - 2].parse().ok()?;

    let last = segments[segments.len() - 1];
    let stem = last.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(last);
    let slice: u32 = stem.parse().ok()?;

    Some((frame, slice))
}

// =============================================================================
// Nearest Lookup
// =============================================================================

/// Find the image closest to a `(frame, slice)` target.
///
/// An exact match wins outright. Otherwise the nearest populated frame
/// and the nearest populated slice are chosen independently (stable sort
/// by absolute distance over each axis's distinct values, first minimal
/// wins; frame candidates are walked in grid order so equidistant frames
/// resolve to the earlier one, slice candidates in reverse grid order so
/// equidistant slices resolve to the deeper one) and the image at that
/// derived pair is looked up. On a sparse grid the derived pair may not
/// exist, in which case this returns `None` even though both components
/// were individually closest; that gap is part of the lookup's contract,
/// not a defect to paper over.
pub fn find_closest_image(
    images: &[ProcessedImage],
    target_frame: u32,
    target_slice: u32,
) -> Option<&ProcessedImage> {
    if images.is_empty() {
        return None;
    }

    if let Some(exact) = images
        .iter()
        .find(|img| img.frame == target_frame && img.slice == target_slice)
    {
        return Some(exact);
    }

    let frames = distinct_in_order(images.iter().map(|img| img.frame));
    let mut slices = distinct_in_order(images.iter().map(|img| img.slice));
    slices.reverse();

    let closest_frame = nearest_value(frames, target_frame)?;
    let closest_slice = nearest_value(slices, target_slice)?;

    images
        .iter()
        .find(|img| img.frame == closest_frame && img.slice == closest_slice)
}

/// Distinct values in first-appearance order.
fn distinct_in_order(values: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut distinct: Vec<u32> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct
}

/// Pick the candidate with minimum absolute distance to `target`.
///
/// The sort by distance is stable, so ties resolve to whichever
/// candidate came first in the given order.
fn nearest_value(mut candidates: Vec<u32>, target: u32) -> Option<u32> {
    candidates.sort_by_key(|&v| v.abs_diff(target));
    candidates.first().copied()
}

// =============================================================================
// Tests
// =============================================================================
