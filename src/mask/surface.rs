//! Raster surface abstraction.
//!
//! [`RgbaSurface`] is a plain pixel-addressable RGBA buffer plus an
//! encode operation backed by the `image` crate. Compositing and PNG
//! encoding run entirely through it, so the codec has no dependency on
//! any GUI toolkit.

use std::io::Cursor;

use bytes::Bytes;
use image::RgbaImage;

use crate::error::ExportError;

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// A pixel-addressable RGBA drawing surface.
///
/// Pixels are stored row-major, 4 bytes per pixel (R, G, B, A). A fresh
/// surface is fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaSurface {
    /// Create a transparent surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * RGBA_CHANNELS;
        Self {
            width,
            height,
            pixels: vec![0u8; len],
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel as `[r, g, b, a]`.
    ///
    /// Returns `None` when the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * RGBA_CHANNELS;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Replace the surface contents with an RGBA buffer.
    ///
    /// This is "draw over" with copy semantics: every pixel, including
    /// fully transparent ones, overwrites what was there before. No alpha
    /// blending takes place.
    ///
    /// # Errors
    ///
    /// `ExportError::BufferMismatch` if the buffer length does not equal
    /// `width * height * 4`.
    pub fn put_pixels(&mut self, rgba: &[u8]) -> Result<(), ExportError> {
        if rgba.len() != self.pixels.len() {
            return Err(ExportError::BufferMismatch {
                expected: self.pixels.len(),
                actual: rgba.len(),
            });
        }
        self.pixels.copy_from_slice(rgba);
        Ok(())
    }

    /// Encode the surface as a PNG payload.
    pub fn encode_png(&self) -> Result<Bytes, ExportError> {
        let img = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            ExportError::BufferMismatch {
                expected: (self.width as usize) * (self.height as usize) * RGBA_CHANNELS,
                actual: self.pixels.len(),
            },
        )?;

        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| ExportError::Encode {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(out.into_inner()))
    }
}
