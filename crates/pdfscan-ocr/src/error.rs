//! Error type for region OCR.

use std::process::ExitStatus;

use thiserror::Error;

/// Why recognizing one table region failed.
///
/// None of these stop extraction; the caller records an empty
/// `ocr_text` for the table and moves on.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The region has no area once clipped to the page.
    #[error("region {0:?} is empty after clipping to the page")]
    EmptyRegion([f64; 4]),

    /// An external tool could not be started.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but reported failure.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The rendered bitmap could not be decoded or re-encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Temporary file handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
