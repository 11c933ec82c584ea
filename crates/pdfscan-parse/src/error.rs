//! Error types for the parsing and interpreter layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`BackendError`] wraps
//! lopdf and I/O failures and converts to [`PdfError`].

use pdfscan_core::PdfError;
use thiserror::Error;

/// Error type for PDF parsing backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during content stream interpretation.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Interpreter(msg) => PdfError::InterpreterError(msg),
            BackendError::Core(e) => e,
        }
    }
}
