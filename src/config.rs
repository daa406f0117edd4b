//! Configuration management for the cinemask CLI.
//!
//! Three subcommands cover the offline workflows around the codec:
//!
//! - `export` - decode a segmentation document and write per-mask files
//! - `extract` - unpack a tar image archive into individual images
//! - `check` - strict-validate every RLE payload in a document
//!
//! All options can also be set via environment variables with the
//! `CINEMASK_` prefix.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// =============================================================================
// Default Values
// =============================================================================

/// Default export format.
pub const DEFAULT_FORMAT: &str = "png";

/// Default overlay color.
pub const DEFAULT_COLOR: &str = "#FF0000";

// =============================================================================
// CLI
// =============================================================================

/// cinemask - RLE mask codec and tar image extractor for cardiac-MRI
/// segmentation data.
#[derive(Parser, Debug, Clone)]
#[command(name = "cinemask")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Consume the parsed CLI into its command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decode a segmentation document and export every mask to files.
    Export(ExportConfig),

    /// Extract frame/slice-indexed images from a tar archive.
    Extract(ExtractConfig),

    /// Strict-validate every RLE payload in a segmentation document.
    Check(CheckConfig),
}

// =============================================================================
// Export Command
// =============================================================================

/// Configuration for the `export` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ExportConfig {
    /// Path to the segmentation document JSON.
    #[arg(long, env = "CINEMASK_DOCUMENT")]
    pub document: PathBuf,

    /// Mask width in pixels (from the source image geometry).
    #[arg(long, env = "CINEMASK_WIDTH")]
    pub width: u32,

    /// Mask height in pixels.
    #[arg(long, env = "CINEMASK_HEIGHT")]
    pub height: u32,

    /// Directory the exported mask files are written into.
    #[arg(long, short, default_value = "masks", env = "CINEMASK_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Export format: png, json or base64.
    #[arg(long, default_value = DEFAULT_FORMAT, env = "CINEMASK_FORMAT")]
    pub format: String,

    /// Overlay color as #RRGGBB.
    #[arg(long, default_value = DEFAULT_COLOR, env = "CINEMASK_COLOR")]
    pub color: String,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ExportConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "mask dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.format.parse::<crate::export::ExportFormat>().is_err() {
            return Err(format!(
                "unsupported format {:?}: expected png, json or base64",
                self.format
            ));
        }
        if self.color.parse::<crate::mask::Color>().is_err() {
            return Err(format!(
                "invalid color {:?}: expected #RRGGBB",
                self.color
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Extract Command
// =============================================================================

/// Configuration for the `extract` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ExtractConfig {
    /// Path to a local tar archive.
    #[arg(long, env = "CINEMASK_ARCHIVE", conflicts_with = "url")]
    pub archive: Option<PathBuf>,

    /// URL of a remote tar archive.
    #[arg(long, env = "CINEMASK_ARCHIVE_URL")]
    pub url: Option<String>,

    /// Directory the extracted images are written into.
    #[arg(long, short, default_value = "images", env = "CINEMASK_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ExtractConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.archive.is_none() && self.url.is_none() {
            return Err(
                "no archive source: set --archive <path> or --url <url>".to_string(),
            );
        }
        Ok(())
    }
}

// =============================================================================
// Check Command
// =============================================================================

/// Configuration for the `check` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CheckConfig {
    /// Path to the segmentation document JSON.
    #[arg(long, env = "CINEMASK_DOCUMENT")]
    pub document: PathBuf,

    /// Mask width in pixels.
    #[arg(long, env = "CINEMASK_WIDTH")]
    pub width: u32,

    /// Mask height in pixels.
    #[arg(long, env = "CINEMASK_HEIGHT")]
    pub height: u32,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "mask dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
