//! Mask export converters.
//!
//! Three converters turn a decoded [`BinaryMask`] into storable payloads:
//!
//! - [`to_png`] - full-opacity colorized RGBA raster, PNG-encoded
//! - [`to_json`] - structured record with the raw cell buffer and a timestamp
//! - [`to_base64`] - PNG payload transcoded into a `data:` URI
//!
//! [`BinaryMask`]: crate::mask::BinaryMask

mod base64;
mod json;
mod png;

pub use self::base64::to_base64;
pub use json::{to_json, MaskJson};
pub use png::to_png;

use std::str::FromStr;

use crate::error::ExportError;

// =============================================================================
// ExportFormat
// =============================================================================

/// Supported mask export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Colorized PNG image
    Png,
    /// Structured JSON record with the raw cell buffer
    Json,
    /// PNG transcoded into a base64 data URI
    Base64,
}

impl ExportFormat {
    /// File extension for the format, without the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
            ExportFormat::Base64 => "txt",
        }
    }

    /// MIME type of the exported payload.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Json => "application/json",
            ExportFormat::Base64 => "text/plain",
        }
    }

    /// Canonical lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
            ExportFormat::Base64 => "base64",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Parse a format name. Unknown names are an explicit error, never a
    /// silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "json" => Ok(ExportFormat::Json),
            "base64" => Ok(ExportFormat::Base64),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}
