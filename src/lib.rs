//! # cinemask
//!
//! The data-transformation core of a cardiac-MRI segmentation viewer:
//! an RLE mask codec and a tar-archive image extractor. The segmentation
//! model, storage, and job orchestration live on a remote backend; this
//! crate turns that backend's payloads into pixel buffers and files, and
//! drives mask uploads back to it.
//!
//! ## Features
//!
//! - **RLE codec**: decode alternating background/foreground run lengths
//!   into dense binary masks, re-encode, and composite colorized overlays
//!   onto RGBA surfaces
//! - **Multi-format export**: PNG, structured JSON, and base64 data-URI
//!   payloads from any decoded mask
//! - **Batch upload**: multipart mask uploads through an injected HTTP
//!   client, with per-mask failure isolation and optional bounded
//!   concurrency
//! - **Tar extraction**: zero-copy POSIX tar parsing, frame/slice
//!   indexing from filenames, and nearest-image lookup over the grid
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`mask`] - run-length codec, colors, surfaces, compositing
//! - [`export`] - PNG/JSON/base64 converters
//! - [`upload`] - injected HTTP client seam and upload orchestration
//! - [`archive`] - tar parsing, image indexing, nearest lookup
//! - [`document`] - serde model of the backend's segmentation JSON
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use cinemask::{Color, RgbaSurface, RunLengths, composite_mask};
//!
//! // Decode a backend RLE payload into a 4x4 mask.
//! let runs = RunLengths::parse("6, 4, 6").unwrap();
//! let mask = runs.decode(4, 4);
//! assert_eq!(mask.foreground_count(), 4);
//!
//! // Composite it as a half-transparent red overlay.
//! let mut surface = RgbaSurface::new(4, 4);
//! let color: Color = "#FF0000".parse().unwrap();
//! composite_mask(&mut surface, &mask, color, 0.5).unwrap();
//! ```

pub mod archive;
pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod mask;
pub mod upload;

// Re-export commonly used types
pub use archive::{
    extract_images_from_url, find_closest_image, frame_slice_from_name, is_image_name,
    parse_archive, process_records, ArchiveFetcher, ExtractedImages, HttpArchiveFetcher,
    ProcessedImage, TarRecord, TAR_BLOCK_SIZE,
};
pub use check::{check_document, MaskVerdict};
pub use config::{CheckConfig, Cli, Command, ExportConfig, ExtractConfig};
pub use document::{Frame, MaskRecord, SegmentationDocument, Slice};
pub use error::{
    ColorError, ExportError, ExtractError, FetchError, RleError, UploadError,
};
pub use export::{to_base64, to_json, to_png, ExportFormat, MaskJson};
pub use mask::{composite_mask, BinaryMask, Color, RgbaSurface, RunLengths};
pub use upload::{
    upload_all_masks, upload_mask, upload_masks_for_slice, BatchUploadOptions, HttpClient,
    ReqwestUploadClient, SliceUploadOptions, SliceUploadSummary, UploadData, UploadForm,
    UploadOptions, UploadResponse, UploadResult, UPLOAD_PATH,
};
