//! Extraction output records.
//!
//! A [`PageRecord`] is built once per PDF page and never mutated afterwards;
//! it owns the [`TableRecord`]s detected on that page in reading order.

use crate::geometry::BBox;

/// Result for one detected table region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRecord {
    /// `[x0, top, x1, bottom]` in points, top-left origin.
    pub bbox: [f64; 4],
    /// Recognized text. Empty when recognition produced nothing or failed.
    pub ocr_text: String,
}

impl TableRecord {
    pub fn new(bbox: BBox, ocr_text: impl Into<String>) -> Self {
        Self {
            bbox: bbox.to_array(),
            ocr_text: ocr_text.into(),
        }
    }
}

/// Result for one PDF page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRecord {
    /// 1-based position in the document.
    pub page: usize,
    pub text: String,
    pub tables: Vec<TableRecord>,
}
