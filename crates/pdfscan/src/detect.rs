//! Table detection seam.

use pdfscan_core::{BBox, PdfError, TableSettings};

use crate::page::Page;

/// Locates tabular regions on a page.
pub trait TableDetector {
    /// Table bounding boxes in reading order.
    fn detect(&self, page: &Page<'_>) -> Result<Vec<BBox>, PdfError>;
}

/// Ruling-line ("lattice") detection with pdfplumber's default settings.
#[derive(Debug, Clone, Default)]
pub struct LatticeDetector {
    settings: TableSettings,
}

impl LatticeDetector {
    pub fn new(settings: TableSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }
}

impl TableDetector for LatticeDetector {
    fn detect(&self, page: &Page<'_>) -> Result<Vec<BBox>, PdfError> {
        let tables = page.find_tables(&self.settings)?;
        Ok(tables.into_iter().map(|t| t.bbox).collect())
    }
}
