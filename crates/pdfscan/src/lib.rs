//! pdfscan: extract page text and OCR the ruled tables of a PDF.
//!
//! This is the public API facade crate. It re-exports types from
//! pdfscan-core and ties together pdfscan-parse (reading and interpretation)
//! and pdfscan-ocr (region recognition).
//!
//! # Architecture
//!
//! - **pdfscan-core**: Backend-independent data types and table detection
//! - **pdfscan-parse**: lopdf backend, page geometry, ruling-line interpreter
//! - **pdfscan-ocr**: pdftoppm + tesseract region recognition
//! - **pdfscan** (this crate): [`Pdf`], [`Page`], and the [`Extractor`]
//!
//! # Example
//!
//! ```ignore
//! use pdfscan::{OcrConfig, extract_pages};
//!
//! for record in extract_pages("survey.pdf", &OcrConfig::default())? {
//!     println!("page {}: {} tables", record.page, record.tables.len());
//! }
//! ```

mod detect;
mod extract;
mod page;
mod pdf;

pub use detect::{LatticeDetector, TableDetector};
pub use extract::{Extractor, PageRecords, detect_or_empty, extract_pages, ocr_or_empty};
pub use page::Page;
pub use pdf::{PagesIter, Pdf};

pub use pdfscan_core::{
    BBox, Edge, Orientation, PageRecord, PdfError, Table, TableRecord, TableSettings,
};
pub use pdfscan_ocr::{OcrConfig, OcrError, RegionOcr, RegionRequest, TesseractOcr};

pub use pdfscan_core;
pub use pdfscan_ocr;
pub use pdfscan_parse;
