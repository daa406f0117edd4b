//! Mask upload.
//!
//! The uploader encodes decoded masks into an export format and drives a
//! multipart upload through an injected [`HttpClient`]. Every failure is
//! caught and shaped into an [`UploadResult`] so UI-triggered batch
//! operations always run to completion; nothing escapes past
//! [`upload_mask`].

mod client;
mod uploader;

pub use client::{
    HttpClient, ReqwestUploadClient, UploadData, UploadForm, UploadResponse, UPLOAD_PATH,
};
pub use uploader::{
    upload_all_masks, upload_mask, upload_masks_for_slice, BatchUploadOptions, SliceUploadOptions,
    SliceUploadSummary, UploadOptions, UploadResult,
};
