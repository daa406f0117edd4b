//! Base64 data-URI mask export.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ExportError;
use crate::export::to_png;
use crate::mask::{BinaryMask, Color};

/// Data-URI prefix for the exported payload.
const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Export a mask as a PNG data URI.
///
/// Produces the PNG payload first, then transcodes it to base64 text with
/// the `data:image/png;base64,` prefix.
pub fn to_base64(mask: &BinaryMask, color: Color) -> Result<String, ExportError> {
    let png = to_png(mask, color)?;
    Ok(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&png)))
}
