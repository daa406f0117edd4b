use thiserror::Error;

/// Errors from run-length decoding in strict-validation mode.
///
/// The lenient decoder never fails; these only surface from
/// [`decode_strict`](crate::mask::RunLengths::decode_strict) and from
/// parsing run-length content strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
    /// Run lengths do not cover the mask exactly
    #[error("run lengths cover {actual} cells, mask needs exactly {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A token in the RLE content string is not a non-negative integer
    #[error("invalid run length token: {0:?}")]
    InvalidRun(String),

    /// Mask dimensions must be positive
    #[error("invalid mask dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors from parsing `#RRGGBB` color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Color string does not start with `#`
    #[error("color must start with '#', got {0:?}")]
    MissingHash(String),

    /// Color string is not exactly `#` plus six hex digits
    #[error("color must be '#' plus 6 hex digits, got {0} digits")]
    InvalidLength(usize),

    /// Hex digits failed to parse
    #[error("invalid hex digits in color: {0}")]
    InvalidHex(String),
}

/// Errors from mask export and compositing.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Color parsing failed
    #[error("color error: {0}")]
    Color(#[from] ColorError),

    /// Mask buffer does not match its declared dimensions
    #[error("mask buffer has {actual} cells, dimensions say {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    /// Surface and mask dimensions disagree
    #[error("surface is {surface_width}x{surface_height}, mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        surface_width: u32,
        surface_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    /// PNG encoding failed
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Export format name is not one of png/json/base64
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),
}

/// Errors from mask upload.
///
/// These never escape [`upload_mask`](crate::upload::upload_mask); the
/// uploader converts them into failure-shaped [`UploadResult`]s so that
/// batch operations always run to completion.
///
/// [`UploadResult`]: crate::upload::UploadResult
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// Payload encoding failed before the request was made
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// RLE decode failed before the request was made
    #[error("RLE error: {0}")]
    Rle(#[from] RleError),

    /// The HTTP client reported a transport or server failure
    #[error("upload failed: {0}")]
    Http(String),

    /// The response lacked the expected `data.s3Url` shape
    #[error("malformed upload response: {0}")]
    MalformedResponse(String),
}

/// Errors from fetching a remote byte payload.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Transport-level failure (connection, TLS, body read)
    #[error("fetch failed for {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status
    #[error("fetch failed for {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors from archive image extraction.
///
/// This is the one boundary that surfaces errors to the caller: a failed
/// fetch leaves nothing meaningful to return. Parse-level problems
/// (truncated archives, unparseable filenames) never error.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Fetching the archive bytes failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
}
