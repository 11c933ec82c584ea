//! Page-by-page extraction into [`PageRecord`]s.
//!
//! Only document and page loading failures are fatal. A page whose table
//! detection fails gets no tables, and a table whose OCR fails gets an
//! empty `ocr_text`; both are logged at `warn`.

use std::path::Path;

use pdfscan_core::{BBox, PageRecord, PdfError, TableRecord};
use pdfscan_ocr::{OcrConfig, OcrError, RegionOcr, RegionRequest, TesseractOcr};

use crate::detect::{LatticeDetector, TableDetector};
use crate::page::Page;
use crate::pdf::{PagesIter, Pdf};

/// Table bounding boxes, or none if detection failed.
pub fn detect_or_empty(page_number: usize, detected: Result<Vec<BBox>, PdfError>) -> Vec<BBox> {
    detected.unwrap_or_else(|err| {
        tracing::warn!(page = page_number, error = %err, "table detection failed; page reported without tables");
        Vec::new()
    })
}

/// Recognized text, or an empty string if recognition failed.
pub fn ocr_or_empty(page_number: usize, bbox: &BBox, recognized: Result<String, OcrError>) -> String {
    recognized.unwrap_or_else(|err| {
        tracing::warn!(
            page = page_number,
            bbox = ?bbox.to_array(),
            error = %err,
            "table OCR failed; recording empty text"
        );
        String::new()
    })
}

/// Builds [`PageRecord`]s for the pages of one PDF file.
///
/// The file path is passed to the OCR engine, which renders regions
/// straight from the file.
pub struct Extractor<'a> {
    pdf_path: &'a Path,
    detector: &'a dyn TableDetector,
    ocr: &'a dyn RegionOcr,
}

impl<'a> Extractor<'a> {
    pub fn new(pdf_path: &'a Path, detector: &'a dyn TableDetector, ocr: &'a dyn RegionOcr) -> Self {
        Self {
            pdf_path,
            detector,
            ocr,
        }
    }

    /// Lazily extract every page of `pdf` in order.
    pub fn pages<'p>(&'p self, pdf: &'p Pdf) -> PageRecords<'p> {
        PageRecords {
            extractor: self,
            pages: pdf.pages_iter(),
        }
    }

    /// Extract one loaded page. Never fails: detection and OCR problems
    /// degrade to empty values.
    pub fn extract_page(&self, page: &Page<'_>) -> PageRecord {
        let page_number = page.page_number();
        let text = page.text();
        let page_bbox = page.bbox();

        let tables = detect_or_empty(page_number, self.detector.detect(page))
            .into_iter()
            .map(|bbox| {
                let request = RegionRequest {
                    pdf_path: self.pdf_path,
                    page_number,
                    page_bbox,
                    region: bbox,
                };
                let text = ocr_or_empty(page_number, &bbox, self.ocr.recognize(&request));
                TableRecord::new(bbox, text)
            })
            .collect::<Vec<_>>();

        tracing::debug!(page = page_number, tables = tables.len(), "page extracted");
        PageRecord {
            page: page_number,
            text,
            tables,
        }
    }
}

/// Iterator of [`PageRecord`]s, created by [`Extractor::pages`].
pub struct PageRecords<'p> {
    extractor: &'p Extractor<'p>,
    pages: PagesIter<'p>,
}

impl Iterator for PageRecords<'_> {
    type Item = Result<PageRecord, PdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.pages.next()?;
        Some(page.map(|page| self.extractor.extract_page(&page)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

impl ExactSizeIterator for PageRecords<'_> {}

/// Extract every page of the PDF at `path` with the default detector and
/// the tesseract-backed OCR engine.
pub fn extract_pages(path: impl AsRef<Path>, config: &OcrConfig) -> Result<Vec<PageRecord>, PdfError> {
    let path = path.as_ref();
    let pdf = Pdf::open_file(path)?;
    tracing::debug!(path = %path.display(), pages = pdf.page_count(), "opened PDF");

    let detector = LatticeDetector::default();
    let ocr = TesseractOcr::new(config.clone());
    let extractor = Extractor::new(path, &detector, &ocr);
    extractor.pages(&pdf).collect()
}
