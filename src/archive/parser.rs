//! POSIX tar parsing.
//!
//! Tar archives are a sequence of 512-byte blocks: a header block per
//! entry, followed by the entry payload rounded up to the next block
//! boundary. The fields this parser reads:
//!
//! ```text
//! Bytes 0-99:    entry name, NUL-terminated (or unterminated at 100)
//! Bytes 124-135: payload size, NUL/space-padded octal ASCII
//! Byte 156:      type flag; 0x00 or '0' marks a regular file
//! ```
//!
//! Parsing is a single pass over an in-memory buffer and never errors:
//! an all-zero header block terminates the archive (the two-block ustar
//! terminator is treated as ending at the first one), and a header or
//! payload that no longer fits the remaining buffer simply stops the
//! pass. Payloads are zero-copy slices into the source buffer.

use bytes::Bytes;

// =============================================================================
// Constants
// =============================================================================

/// Size of a tar block (header and payload alignment unit).
pub const TAR_BLOCK_SIZE: usize = 512;

/// Length of the name field at the start of the header.
const NAME_LEN: usize = 100;

/// Byte range of the octal size field.
const SIZE_OFFSET: usize = 124;
const SIZE_LEN: usize = 12;

/// Offset of the entry type flag.
const TYPEFLAG_OFFSET: usize = 156;

// =============================================================================
// TarRecord
// =============================================================================

/// One regular-file entry extracted from a tar archive.
///
/// `data` is a zero-copy view into the archive buffer; nothing is
/// duplicated until a consumer materializes the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarRecord {
    /// Entry name as stored in the header
    pub name: String,

    /// Payload bytes
    pub data: Bytes,

    /// Payload size in bytes
    pub size: usize,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a tar byte buffer into its regular-file records, in archive
/// order.
///
/// Directories and other special entry types are skipped (their headers
/// are still consumed and their payloads stepped over). Never errors: a
/// truncated or corrupt archive yields whatever parsed cleanly before
/// the damage.
pub fn parse_archive(archive: &Bytes) -> Vec<TarRecord> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    while offset + TAR_BLOCK_SIZE <= archive.len() {
        let header = &archive[offset..offset + TAR_BLOCK_SIZE];

        // End of archive: an all-zero header block.
        if header.iter().all(|&b| b == 0) {
            break;
        }

        let name = header_name(header);
        let size = parse_octal(&header[SIZE_OFFSET..SIZE_OFFSET + SIZE_LEN]);
        let typeflag = header[TYPEFLAG_OFFSET];
        let is_regular_file = typeflag == 0 || typeflag == b'0';

        let payload_start = offset + TAR_BLOCK_SIZE;

        if is_regular_file && size > 0 && !name.is_empty() {
            // A payload that overruns the buffer cannot be read; stop.
            if payload_start + size > archive.len() {
                break;
            }
            records.push(TarRecord {
                name,
                data: archive.slice(payload_start..payload_start + size),
                size,
            });
        }

        // Advance past the header plus the block-aligned payload,
        // whether or not the entry was extracted.
        offset = payload_start + size.div_ceil(TAR_BLOCK_SIZE) * TAR_BLOCK_SIZE;
    }

    records
}

/// Decode the name field: bytes up to the first NUL (or all 100 when
/// unterminated), lossily as UTF-8.
fn header_name(header: &[u8]) -> String {
    let raw = &header[..NAME_LEN];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Parse a NUL/space-padded octal ASCII field. Empty or unparseable
/// fields are 0.
fn parse_octal(field: &[u8]) -> usize {
    let trimmed: Vec<u8> = field
        .iter()
        .copied()
        .filter(|&b| b != 0 && b != b' ')
        .collect();

    if trimmed.is_empty() {
        return 0;
    }

    let mut value = 0usize;
    for &b in &trimmed {
        if !(b'0'..=b'7').contains(&b) {
            return 0;
        }
        value = value * 8 + (b - b'0') as usize;
    }
    value
}

// =============================================================================
// Tests
// =============================================================================
