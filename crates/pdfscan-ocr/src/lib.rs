//! pdfscan-ocr: recognize the text inside a rectangular page region.
//!
//! The chain is render (`pdftoppm`) → grayscale → autocontrast → 3×3 median
//! → recognize (`tesseract`). Temporary files live in a per-call directory
//! that is removed when the call returns, whether it succeeded or not.
//!
//! [`RegionOcr`] is the seam the extractor calls through; [`TesseractOcr`]
//! is the implementation backed by the external tools.

pub mod config;
pub mod error;
pub mod preprocess;
pub mod raster;
pub mod recognize;

use std::path::Path;

use pdfscan_core::BBox;

pub use config::{DEFAULT_LANG, DEFAULT_RESOLUTION, OcrConfig};
pub use error::OcrError;
pub use preprocess::{autocontrast, preprocess};
pub use raster::{PixelRegion, pixel_region, render_region};
pub use recognize::run_tesseract;

/// One region to recognize.
#[derive(Debug, Clone, Copy)]
pub struct RegionRequest<'a> {
    /// The PDF file the region lives in.
    pub pdf_path: &'a Path,
    /// 1-based page number.
    pub page_number: usize,
    /// The visible page, `[0, 0, width, height]` in points.
    pub page_bbox: BBox,
    /// The region to recognize, in the same space as `page_bbox`.
    pub region: BBox,
}

/// Recognizes text in a page region.
pub trait RegionOcr {
    fn recognize(&self, request: &RegionRequest<'_>) -> Result<String, OcrError>;
}

/// [`RegionOcr`] backed by `pdftoppm` and `tesseract`.
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }
}

impl RegionOcr for TesseractOcr {
    fn recognize(&self, request: &RegionRequest<'_>) -> Result<String, OcrError> {
        let pixels = pixel_region(&request.region, &request.page_bbox, self.config.resolution)?;

        let dir = tempfile::Builder::new().prefix("pdfscan-ocr-").tempdir()?;
        let rendered = render_region(
            &self.config.pdftoppm,
            request.pdf_path,
            request.page_number,
            pixels,
            self.config.resolution,
            dir.path(),
        )?;

        let cleaned = preprocess(&image::open(&rendered)?);
        let input = dir.path().join("clean.png");
        cleaned.save(&input)?;

        let text = run_tesseract(&self.config.tesseract, &input, &self.config.lang)?;
        tracing::debug!(
            page = request.page_number,
            width = pixels.width,
            height = pixels.height,
            chars = text.chars().count(),
            "recognized region"
        );
        Ok(text)
    }
}
