//! Tar archive extraction and image indexing.
//!
//! The backend delivers bulk image downloads as a single POSIX tar
//! payload. This module parses that buffer into zero-copy file records,
//! filters for image entries, recovers `(frame, slice)` indices from the
//! `<anything>_<frame>_<slice>.<ext>` filename convention, and serves
//! "closest available image" lookups over the resulting grid.
//!
//! # Data Flow
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Tar byte buffer (fetched from backend)   │
//! └────────────────────┬──────────────────────┘
//!                      │ parse_archive
//!                      ▼
//! ┌───────────────────────────────────────────┐
//! │  TarRecord list (zero-copy byte slices)   │
//! └────────────────────┬──────────────────────┘
//!                      │ process_records
//!                      ▼
//! ┌───────────────────────────────────────────┐
//! │  ExtractedImages: (frame, slice)-indexed  │
//! │  handles + owned payload store            │
//! └───────────────────────────────────────────┘
//! ```
//!
//! Parsing is lenient throughout: truncated or corrupt archives simply
//! stop early, and entries that don't match the naming convention are
//! dropped with a diagnostic. The only error surface is the fetch.

mod fetch;
mod images;
mod parser;

pub use fetch::{extract_images_from_url, ArchiveFetcher, HttpArchiveFetcher};
pub use images::{
    find_closest_image, frame_slice_from_name, is_image_name, process_records, ExtractedImages,
    ProcessedImage,
};
pub use parser::{parse_archive, TarRecord, TAR_BLOCK_SIZE};
