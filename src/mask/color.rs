//! Overlay color parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// An opaque RGB overlay color, parsed from a `#RRGGBB` string.
///
/// Only the six-hex-digit form is accepted: no shorthand (`#F00`) and no
/// alpha channel. Opacity is supplied separately at compositing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build a color from raw channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;

        if digits.len() != 6 {
            return Err(ColorError::InvalidLength(digits.len()));
        }

        let bytes = hex::decode(digits).map_err(|_| ColorError::InvalidHex(s.to_string()))?;
        Ok(Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
