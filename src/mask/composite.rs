//! Mask overlay compositing.

use crate::error::ExportError;
use crate::mask::surface::RGBA_CHANNELS;
use crate::mask::{BinaryMask, Color, RgbaSurface};

/// Build the RGBA overlay buffer for a mask.
///
/// Foreground cells get the overlay color at the given alpha; background
/// cells are written as explicit transparent pixels so a later draw-over
/// clears any stale content instead of leaving it underneath.
pub(crate) fn overlay_pixels(mask: &BinaryMask, color: Color, alpha: u8) -> Vec<u8> {
    let mut rgba = vec![0u8; mask.len() * RGBA_CHANNELS];
    for (i, &cell) in mask.data().iter().enumerate() {
        if cell != 0 {
            let idx = i * RGBA_CHANNELS;
            rgba[idx] = color.r;
            rgba[idx + 1] = color.g;
            rgba[idx + 2] = color.b;
            rgba[idx + 3] = alpha;
        }
    }
    rgba
}

/// Composite a mask onto a surface as a colorized overlay.
///
/// Renders the mask into an offscreen RGBA buffer, then draws that buffer
/// over the surface with copy (non-blending) semantics: foreground cells
/// become `color` at `round(opacity * 255)` alpha, background cells become
/// fully transparent.
///
/// `opacity` is clamped to `[0, 1]`.
///
/// # Errors
///
/// `ExportError::DimensionMismatch` if the surface and mask dimensions
/// disagree.
pub fn composite_mask(
    surface: &mut RgbaSurface,
    mask: &BinaryMask,
    color: Color,
    opacity: f32,
) -> Result<(), ExportError> {
    if surface.width() != mask.width() || surface.height() != mask.height() {
        return Err(ExportError::DimensionMismatch {
            surface_width: surface.width(),
            surface_height: surface.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let buffer = overlay_pixels(mask, color, alpha);
    surface.put_pixels(&buffer)
}
