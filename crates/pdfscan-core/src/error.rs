//! Error type for pdfscan.
//!
//! [`PdfError`] covers failures that stop extraction of the whole document.
//! Per-page and per-table problems never surface as a `PdfError`; they are
//! downgraded where they happen.

use std::fmt;

/// Fatal error types for PDF processing.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading PDF data.
    IoError(String),
    /// Error during content stream interpretation.
    InterpreterError(String),
    /// The PDF is encrypted and requires a password to open.
    PasswordRequired,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::InterpreterError(msg) => write!(f, "interpreter error: {msg}"),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}
