//! Strict document validation.
//!
//! Walks every mask record of a segmentation document, parses its RLE
//! contents, and strict-decodes it against the expected mask dimensions.
//! Every mask with contents gets a verdict; one bad mask never stops the
//! walk. The CLI `check` command maps the verdicts to log lines and an
//! exit code.

use crate::document::SegmentationDocument;
use crate::error::RleError;
use crate::mask::RunLengths;

/// The strict-validation verdict for one mask record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskVerdict {
    pub frame_index: u32,
    pub slice_index: u32,
    pub class_name: String,

    /// Foreground cell count on success, the parse or length error
    /// otherwise.
    pub outcome: Result<usize, RleError>,
}

impl MaskVerdict {
    /// Whether the mask passed strict validation.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Strict-validate every RLE payload in a document.
///
/// Masks without contents are skipped (absence is not a defect). Returns
/// one verdict per checked mask, in document order; the walk always runs
/// to completion. The document as a whole fails when any verdict does.
pub fn check_document(
    document: &SegmentationDocument,
    width: u32,
    height: u32,
) -> Vec<MaskVerdict> {
    let mut verdicts = Vec::new();

    for frame in &document.frames {
        for slice in &frame.slices {
            for record in &slice.masks {
                let Some(contents) = record.contents.as_deref() else {
                    continue;
                };

                let outcome = RunLengths::parse(contents)
                    .and_then(|runs| runs.decode_strict(width, height))
                    .map(|mask| mask.foreground_count());

                verdicts.push(MaskVerdict {
                    frame_index: frame.frame_index,
                    slice_index: slice.slice_index,
                    class_name: record.class_name.clone(),
                    outcome,
                });
            }
        }
    }

    verdicts
}
