//! Segmentation document model.
//!
//! The backend's segmentation result is a Frame → Slice → Mask tree. This
//! crate only walks the tree to batch-process masks; it does not persist
//! it or enforce document-level invariants beyond "RLE content present or
//! absent". Field names mirror the backend's JSON exactly.
//!
//! ```json
//! {
//!   "frames": [{
//!     "frameindex": 0,
//!     "slices": [{
//!       "sliceindex": 0,
//!       "segmentationmasks": [{
//!         "class": "LV",
//!         "segmentationmaskcontents": "120,34,90",
//!         "confidence": 0.97
//!       }]
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A full segmentation result: one entry per cine frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentationDocument {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// One time-point of the cine sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "frameindex")]
    pub frame_index: u32,

    #[serde(default)]
    pub slices: Vec<Slice>,
}

/// One cross-sectional image within a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    #[serde(rename = "sliceindex")]
    pub slice_index: u32,

    #[serde(rename = "segmentationmasks", default)]
    pub masks: Vec<MaskRecord>,
}

/// One class mask within a slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskRecord {
    /// Anatomical class label (e.g. "LV", "RV", "MYO")
    #[serde(rename = "class")]
    pub class_name: String,

    /// RLE-encoded mask payload; absent masks are skipped, not an error
    #[serde(rename = "segmentationmaskcontents", default)]
    pub contents: Option<String>,

    /// Model confidence in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SegmentationDocument {
    /// Find a frame by its index.
    pub fn frame(&self, frame_index: u32) -> Option<&Frame> {
        self.frames.iter().find(|f| f.frame_index == frame_index)
    }

    /// Find a slice by frame and slice index.
    pub fn slice(&self, frame_index: u32, slice_index: u32) -> Option<&Slice> {
        self.frame(frame_index)?
            .slices
            .iter()
            .find(|s| s.slice_index == slice_index)
    }
}
