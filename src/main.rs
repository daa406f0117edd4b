//! cinemask - RLE mask codec and tar image extractor CLI.
//!
//! Offline workflows around the codec: export decoded masks to files,
//! unpack bulk image archives, and strict-validate RLE payloads.

use std::fs;
use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinemask::{
    archive::{extract_images_from_url, parse_archive, process_records, HttpArchiveFetcher},
    check::check_document,
    config::{CheckConfig, Cli, Command, ExportConfig, ExtractConfig},
    document::SegmentationDocument,
    export::{to_base64, to_json, to_png, ExportFormat},
    mask::{Color, RunLengths},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Export(config) => run_export(config),
        Command::Extract(config) => run_extract(config).await,
        Command::Check(config) => run_check(config),
    }
}

// =============================================================================
// Export Command
// =============================================================================

fn run_export(config: ExportConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let document = match load_document(&config.document) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to load document: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Validated above.
    let Ok(format) = config.format.parse::<ExportFormat>() else {
        return ExitCode::FAILURE;
    };
    let Ok(color) = config.color.parse::<Color>() else {
        return ExitCode::FAILURE;
    };

    if let Err(e) = fs::create_dir_all(&config.out_dir) {
        error!("Failed to create {}: {}", config.out_dir.display(), e);
        return ExitCode::FAILURE;
    }

    info!("Exporting masks:");
    info!("  document: {}", config.document.display());
    info!("  dimensions: {}x{}", config.width, config.height);
    info!("  format: {}", format.name());
    info!("  output: {}", config.out_dir.display());

    let mut written = 0usize;
    let mut failed = 0usize;

    for frame in &document.frames {
        for slice in &frame.slices {
            for record in &slice.masks {
                let Some(contents) = record.contents.as_deref() else {
                    continue;
                };

                let runs = match RunLengths::parse(contents) {
                    Ok(runs) => runs,
                    Err(e) => {
                        warn!(
                            "  {} f{} s{}: {}",
                            record.class_name, frame.frame_index, slice.slice_index, e
                        );
                        failed += 1;
                        continue;
                    }
                };

                let mask = runs.decode(config.width, config.height);
                let filename = format!(
                    "mask_{}_f{}_s{}.{}",
                    record.class_name,
                    frame.frame_index,
                    slice.slice_index,
                    format.extension()
                );

                let payload: Vec<u8> = match format {
                    ExportFormat::Png => match to_png(&mask, color) {
                        Ok(bytes) => bytes.to_vec(),
                        Err(e) => {
                            warn!("  {}: {}", filename, e);
                            failed += 1;
                            continue;
                        }
                    },
                    ExportFormat::Base64 => match to_base64(&mask, color) {
                        Ok(uri) => uri.into_bytes(),
                        Err(e) => {
                            warn!("  {}: {}", filename, e);
                            failed += 1;
                            continue;
                        }
                    },
                    ExportFormat::Json => {
                        let mut metadata = serde_json::Map::new();
                        metadata.insert(
                            "className".to_string(),
                            serde_json::Value::String(record.class_name.clone()),
                        );
                        let json = to_json(&mask, metadata);
                        match serde_json::to_vec_pretty(&json) {
                            Ok(bytes) => bytes,
                            Err(e) => {
                                warn!("  {}: {}", filename, e);
                                failed += 1;
                                continue;
                            }
                        }
                    }
                };

                let path = config.out_dir.join(&filename);
                match fs::write(&path, payload) {
                    Ok(()) => written += 1,
                    Err(e) => {
                        warn!("  {}: {}", path.display(), e);
                        failed += 1;
                    }
                }
            }
        }
    }

    info!("Exported {} mask(s), {} failed", written, failed);
    if written == 0 && failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// =============================================================================
// Extract Command
// =============================================================================

async fn run_extract(config: ExtractConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut extracted = if let Some(url) = &config.url {
        let fetcher = HttpArchiveFetcher::new();
        match extract_images_from_url(&fetcher, url).await {
            Ok(extracted) => extracted,
            Err(e) => {
                error!("Extraction failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        // Validation guarantees a path when no URL is given.
        let Some(path) = &config.archive else {
            return ExitCode::FAILURE;
        };
        let payload = match fs::read(path) {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
        process_records(parse_archive(&payload))
    };

    if extracted.is_empty() {
        warn!("No images matched the <name>_<frame>_<slice>.<ext> convention");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = fs::create_dir_all(&config.out_dir) {
        error!("Failed to create {}: {}", config.out_dir.display(), e);
        return ExitCode::FAILURE;
    }

    let frames: Vec<u32> = {
        let mut frames: Vec<u32> = extracted.images.iter().map(|i| i.frame).collect();
        frames.dedup();
        frames
    };
    info!(
        "Extracted {} image(s) across {} frame(s)",
        extracted.len(),
        frames.len()
    );

    let mut written = 0usize;
    for image in &extracted.images {
        let Some(data) = extracted.data(image) else {
            continue;
        };
        // Flatten any archive directory structure into plain filenames.
        let basename = image.name.rsplit('/').next().unwrap_or(&image.name);
        let path = config.out_dir.join(basename);
        match fs::write(&path, data) {
            Ok(()) => written += 1,
            Err(e) => warn!("  {}: {}", path.display(), e),
        }
    }

    info!("Wrote {} image(s) to {}", written, config.out_dir.display());
    extracted.dispose_all();
    ExitCode::SUCCESS
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(config: CheckConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let document = match load_document(&config.document) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to load document: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Checking RLE payloads against {}x{} masks",
        config.width, config.height
    );

    let verdicts = check_document(&document, config.width, config.height);
    let mut bad = 0usize;

    for verdict in &verdicts {
        match &verdict.outcome {
            Ok(foreground) => info!(
                "  ok   {} f{} s{} ({} foreground px)",
                verdict.class_name, verdict.frame_index, verdict.slice_index, foreground
            ),
            Err(e) => {
                warn!(
                    "  FAIL {} f{} s{}: {}",
                    verdict.class_name, verdict.frame_index, verdict.slice_index, e
                );
                bad += 1;
            }
        }
    }

    info!("Checked {} payload(s), {} failed", verdicts.len(), bad);
    if bad > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn load_document(path: &std::path::Path) -> Result<SegmentationDocument, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
