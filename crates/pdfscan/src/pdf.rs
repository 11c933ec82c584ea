//! Top-level PDF document type.

use std::path::Path;

use pdfscan_core::PdfError;
use pdfscan_parse::LopdfDocument;

use crate::page::Page;

/// Iterator over pages of a PDF document, yielding each page on demand.
///
/// Created by [`Pdf::pages_iter()`]. Each call to [`next()`](Iterator::next)
/// resolves one page, so only that page's data is held at a time.
pub struct PagesIter<'a> {
    pdf: &'a Pdf,
    current: usize,
    count: usize,
}

impl<'a> Iterator for PagesIter<'a> {
    type Item = Result<Page<'a>, PdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.pdf.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PagesIter<'_> {}

/// A PDF document opened for extraction.
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open_file("survey.pdf")?;
/// for page in pdf.pages_iter() {
///     let page = page?;
///     println!("{}: {}", page.page_number(), page.text());
/// }
/// ```
pub struct Pdf {
    doc: LopdfDocument,
}

impl std::fmt::Debug for Pdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pdf").field("doc", &self.doc).finish()
    }
}

impl Pdf {
    /// Open a PDF document from a file path.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::IoError(e.to_string()))?;
        Self::open(&bytes)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the bytes are not a valid PDF or the document
    /// is encrypted.
    pub fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = LopdfDocument::open(bytes).map_err(PdfError::from)?;
        Ok(Self { doc })
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    /// Load the page at a 0-based index.
    pub fn page(&self, index: usize) -> Result<Page<'_>, PdfError> {
        let page = self.doc.get_page(index).map_err(PdfError::from)?;
        let geometry = self.doc.page_geometry(&page).map_err(PdfError::from)?;
        Ok(Page::new(&self.doc, page, geometry))
    }

    /// Return a lazy iterator over all pages.
    pub fn pages_iter(&self) -> PagesIter<'_> {
        PagesIter {
            pdf: self,
            current: 0,
            count: self.page_count(),
        }
    }
}
