//! RLE mask codec.
//!
//! This module turns the run-length-encoded mask payloads produced by the
//! segmentation backend into dense binary pixel masks, and composites those
//! masks as colorized semi-transparent overlays onto RGBA raster surfaces.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Segmentation document (RLE strings)     │
//! └────────────────────┬─────────────────────┘
//!                      │ RunLengths::parse
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │  RunLengths  ──decode──▶  BinaryMask     │
//! │              ◀─encode──                  │
//! └────────────────────┬─────────────────────┘
//!                      │ composite_mask
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │  RgbaSurface (offscreen RGBA raster)     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The codec is stateless: every function is pure over its inputs, and the
//! returned buffers are caller-owned.

mod color;
mod composite;
mod rle;
mod surface;

pub use color::Color;
pub use composite::composite_mask;
pub use rle::{BinaryMask, RunLengths};
pub use surface::RgbaSurface;
