//! OCR engine configuration.

use std::path::PathBuf;

/// Rasterization resolution used for table regions.
pub const DEFAULT_RESOLUTION: u32 = 300;

/// Tesseract language set: Korean plus English.
pub const DEFAULT_LANG: &str = "kor+eng";

/// Locations and parameters of the external OCR tools.
///
/// Executables default to a bare name, resolved through `PATH` when the
/// tool is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// `tesseract` executable.
    pub tesseract: PathBuf,
    /// `pdftoppm` executable (poppler).
    pub pdftoppm: PathBuf,
    /// Rendering resolution in DPI.
    pub resolution: u32,
    /// Tesseract `-l` argument.
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract: PathBuf::from("tesseract"),
            pdftoppm: PathBuf::from("pdftoppm"),
            resolution: DEFAULT_RESOLUTION,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl OcrConfig {
    pub fn with_tesseract(mut self, path: impl Into<PathBuf>) -> Self {
        self.tesseract = path.into();
        self
    }

    pub fn with_pdftoppm(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdftoppm = path.into();
        self
    }
}
