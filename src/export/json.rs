//! JSON mask export.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::mask::BinaryMask;

/// Payload format marker written into every exported record.
const FORMAT_BINARY: &str = "binary";

/// A mask exported as a structured JSON record.
///
/// `data` carries the raw cell buffer, so the original mask can be
/// reconstructed bit-for-bit. Extra metadata fields are flattened into
/// the top-level object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskJson {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: String,
    /// RFC 3339 capture time
    pub timestamp: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl MaskJson {
    /// Reconstruct the binary mask from the record.
    ///
    /// Returns `None` if `data` does not match the declared dimensions.
    pub fn to_mask(&self) -> Option<BinaryMask> {
        BinaryMask::from_raw(self.data.clone(), self.width, self.height)
    }
}

/// Export a mask as a [`MaskJson`] record.
///
/// Pure except for the timestamp capture. `metadata` entries are merged
/// into the top level of the serialized object.
pub fn to_json(mask: &BinaryMask, metadata: Map<String, Value>) -> MaskJson {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    MaskJson {
        width: mask.width(),
        height: mask.height(),
        data: mask.data().to_vec(),
        format: FORMAT_BINARY.to_string(),
        timestamp,
        metadata,
    }
}
