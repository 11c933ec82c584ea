//! Page type: text, ruling edges, and tables of a single page.

use pdfscan_core::{BBox, Edge, PdfError, Table, TableFinder, TableSettings};
use pdfscan_parse::{LopdfDocument, LopdfPage, PageGeometry};

/// A single page of an open [`Pdf`](crate::Pdf).
///
/// Coordinates are in points with the origin at the top-left corner of the
/// visible page (CropBox, after /Rotate).
pub struct Page<'a> {
    doc: &'a LopdfDocument,
    inner: LopdfPage,
    geometry: PageGeometry,
}

impl<'a> Page<'a> {
    pub(crate) fn new(doc: &'a LopdfDocument, inner: LopdfPage, geometry: PageGeometry) -> Self {
        Self {
            doc,
            inner,
            geometry,
        }
    }

    /// 1-based page number.
    pub fn page_number(&self) -> usize {
        self.inner.index + 1
    }

    pub fn width(&self) -> f64 {
        self.geometry.width()
    }

    pub fn height(&self) -> f64 {
        self.geometry.height()
    }

    /// The visible page as `[0, 0, width, height]`.
    pub fn bbox(&self) -> BBox {
        self.geometry.page_bbox()
    }

    pub fn rotation(&self) -> i32 {
        self.geometry.rotation()
    }

    /// Plain text of the page; empty when nothing is extractable.
    pub fn text(&self) -> String {
        self.doc.page_text(&self.inner)
    }

    /// Every straight segment of every painted path on the page.
    pub fn edges(&self) -> Result<Vec<Edge>, PdfError> {
        self.doc
            .page_edges(&self.inner, &self.geometry)
            .map_err(PdfError::from)
    }

    /// Detect ruled tables, ordered top to bottom then left to right.
    pub fn find_tables(&self, settings: &TableSettings) -> Result<Vec<Table>, PdfError> {
        let finder = TableFinder::new(self.edges()?, settings.clone());
        Ok(finder.find_tables())
    }
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("page_number", &self.page_number())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
