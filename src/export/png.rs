//! PNG mask export.

use bytes::Bytes;

use crate::error::ExportError;
use crate::mask::{composite_mask, BinaryMask, Color, RgbaSurface};

/// Export a mask as a PNG payload.
///
/// Foreground cells are rendered in `color` at full opacity, background
/// cells are fully transparent. The raster matches what the overlay
/// compositor draws at opacity 1.0.
pub fn to_png(mask: &BinaryMask, color: Color) -> Result<Bytes, ExportError> {
    let mut surface = RgbaSurface::new(mask.width(), mask.height());
    composite_mask(&mut surface, mask, color, 1.0)?;
    surface.encode_png()
}
