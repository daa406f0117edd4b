//! Run-length mask decoding and encoding.
//!
//! # Encoding
//!
//! A mask is encoded as an ordered sequence of run lengths over the
//! row-major pixel raster. The value alternates strictly, starting with
//! background (0), then foreground (1):
//!
//! ```text
//! [3, 4, 2] over a 3x3 mask:
//!   3 cells of 0, 4 cells of 1, 2 cells of 0
//!   => 0 0 0
//!      1 1 1
//!      1 0 0
//! ```
//!
//! A mask that starts with foreground encodes a zero-length first run.
//! A well-formed sequence sums to exactly `width * height`; the lenient
//! decoder tolerates both under-run (trailing cells stay 0) and over-run
//! (excess silently dropped), matching the backend's tolerance for
//! partially-corrupt results. [`RunLengths::decode_strict`] rejects both.

use crate::error::RleError;

// =============================================================================
// RunLengths
// =============================================================================

/// An ordered sequence of run lengths, alternating background/foreground
/// starting with background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLengths(pub Vec<u32>);

impl RunLengths {
    /// Wrap a raw run-length sequence.
    pub fn new(runs: Vec<u32>) -> Self {
        Self(runs)
    }

    /// Parse a run-length content string from a segmentation document.
    ///
    /// Accepts comma-separated non-negative integers, with an optional
    /// surrounding `[...]` so both raw and JSON-array-shaped payloads
    /// decode. Whitespace around tokens is tolerated. An empty string
    /// parses to an empty sequence.
    ///
    /// # Errors
    ///
    /// `RleError::InvalidRun` if any token is not a non-negative integer.
    pub fn parse(contents: &str) -> Result<Self, RleError> {
        let trimmed = contents.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);

        if inner.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }

        let mut runs = Vec::new();
        for token in inner.split(',') {
            let token = token.trim();
            let run: u32 = token
                .parse()
                .map_err(|_| RleError::InvalidRun(token.to_string()))?;
            runs.push(run);
        }
        Ok(Self(runs))
    }

    /// Total number of cells covered by the sequence.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&r| r as usize).sum()
    }

    /// Number of foreground cells (sum of odd-indexed runs).
    pub fn foreground_total(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, &r)| r as usize)
            .sum()
    }

    /// Decode into a dense binary mask, leniently.
    ///
    /// Writes runs of alternating 0/1 starting with 0 into a
    /// `width * height` buffer. If the runs sum to less than the buffer,
    /// trailing cells stay 0; if they sum to more, the excess is dropped.
    /// Never fails for any run sequence.
    pub fn decode(&self, width: u32, height: u32) -> BinaryMask {
        let capacity = (width as usize) * (height as usize);
        let mut data = vec![0u8; capacity];

        let mut cursor = 0usize;
        let mut background = true;
        for &run in &self.0 {
            if cursor >= capacity {
                break;
            }
            let end = (cursor + run as usize).min(capacity);
            if !background {
                for cell in &mut data[cursor..end] {
                    *cell = 1;
                }
            }
            cursor = end;
            background = !background;
        }

        BinaryMask {
            data,
            width,
            height,
        }
    }

    /// Decode with strict validation.
    ///
    /// # Errors
    ///
    /// - `RleError::InvalidDimensions` if either dimension is zero
    /// - `RleError::LengthMismatch` unless the runs sum to exactly
    ///   `width * height`
    pub fn decode_strict(&self, width: u32, height: u32) -> Result<BinaryMask, RleError> {
        if width == 0 || height == 0 {
            return Err(RleError::InvalidDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize);
        let actual = self.total();
        if actual != expected {
            return Err(RleError::LengthMismatch { expected, actual });
        }

        Ok(self.decode(width, height))
    }
}

// =============================================================================
// BinaryMask
// =============================================================================

/// A dense binary pixel mask in row-major order.
///
/// Each cell is 0 (background) or 1 (foreground). The buffer is owned by
/// the caller; the codec holds no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl BinaryMask {
    /// Build a mask from a raw buffer.
    ///
    /// Returns `None` if the buffer length does not equal `width * height`.
    /// Any non-zero cell is normalized to 1.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return None;
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw cell buffer, row-major, each element 0 or 1.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the mask has zero cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of foreground cells.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Re-encode into run lengths.
    ///
    /// Produces the canonical alternating form: the first run counts
    /// leading background cells and is zero when the mask starts with
    /// foreground; no other run is zero-length. `encode` then `decode`
    /// reproduces the mask bit-for-bit.
    pub fn encode(&self) -> RunLengths {
        let mut runs = Vec::new();
        let mut current = 0u8;
        let mut count = 0u32;

        for &cell in &self.data {
            if cell == current {
                count += 1;
            } else {
                runs.push(count);
                current = cell;
                count = 1;
            }
        }
        if count > 0 || runs.is_empty() {
            runs.push(count);
        }

        RunLengths(runs)
    }
}

// =============================================================================
// Tests
// =============================================================================
