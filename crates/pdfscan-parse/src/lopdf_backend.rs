//! lopdf-based PDF parsing backend.
//!
//! Opens documents with the [lopdf](https://crates.io/crates/lopdf) crate and
//! answers the per-page questions the extractor asks: geometry, plain text,
//! and ruling edges.

use crate::error::BackendError;
use crate::interpreter::{EdgeInterpreter, resolve_dict};
use crate::page_geometry::PageGeometry;
use pdfscan_core::{BBox, Ctm, Edge, PdfError};

/// Upper bound on `/Parent` hops when resolving inherited page attributes.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Ordered `(page number, object id)` pairs, indexed by 0-based page index.
    pages: Vec<(u32, lopdf::ObjectId)>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.pages.len())
            .finish_non_exhaustive()
    }
}

/// A reference to a single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    /// The lopdf object ID for this page.
    pub object_id: lopdf::ObjectId,
    /// The 0-based page index.
    pub index: usize,
    number: u32,
}

impl LopdfDocument {
    /// Parse a document from raw PDF bytes.
    ///
    /// Encrypted documents are rejected with [`PdfError::PasswordRequired`].
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let pages = inner.get_pages().into_iter().collect();
        Ok(Self { inner, pages })
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up the page at a 0-based index.
    pub fn get_page(&self, index: usize) -> Result<LopdfPage, BackendError> {
        let (number, object_id) = *self.pages.get(index).ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                self.pages.len()
            ))
        })?;
        Ok(LopdfPage {
            object_id,
            index,
            number,
        })
    }

    /// Resolve MediaBox, CropBox and Rotate into a [`PageGeometry`].
    ///
    /// All three are inherited through the page tree; a missing CropBox
    /// defaults to the MediaBox.
    pub fn page_geometry(&self, page: &LopdfPage) -> Result<PageGeometry, BackendError> {
        let media_box = resolve_inherited(&self.inner, page.object_id, b"MediaBox")?
            .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))
            .and_then(|obj| self.box_from_object(obj, "MediaBox"))?;

        let crop_box = resolve_inherited(&self.inner, page.object_id, b"CropBox")?
            .map(|obj| self.box_from_object(obj, "CropBox"))
            .transpose()?;

        let rotation = match resolve_inherited(&self.inner, page.object_id, b"Rotate")? {
            Some(obj) => {
                let raw = obj
                    .as_i64()
                    .map_err(|e| BackendError::Parse(format!("Rotate is not an integer: {e}")))?;
                i32::try_from(raw).unwrap_or_else(|_| {
                    tracing::debug!(page = page.index + 1, rotate = raw, "Rotate out of range, using 0");
                    0
                })
            }
            None => 0,
        };

        Ok(PageGeometry::new(media_box, crop_box, rotation))
    }

    /// Plain text of a page.
    ///
    /// Text runs that cannot be decoded are skipped; a page with no
    /// decodable text yields an empty string.
    pub fn page_text(&self, page: &LopdfPage) -> String {
        let mut text = String::new();
        for chunk in self.inner.extract_text_chunks(&[page.number]) {
            match chunk {
                Ok(s) => text.push_str(&s),
                Err(e) => tracing::debug!(page = page.index + 1, error = %e, "skipping text chunk"),
            }
        }
        text.trim_end_matches(['\r', '\n']).to_string()
    }

    /// Ruling edges painted on a page, in top-left page space.
    pub fn page_edges(
        &self,
        page: &LopdfPage,
        geometry: &PageGeometry,
    ) -> Result<Vec<Edge>, BackendError> {
        let content = self
            .inner
            .get_and_decode_page_content(page.object_id)
            .map_err(|e| {
                BackendError::Interpreter(format!("failed to decode page content: {e}"))
            })?;
        let resources = resolve_inherited(&self.inner, page.object_id, b"Resources")?
            .and_then(|obj| resolve_dict(&self.inner, obj));

        let mut interp = EdgeInterpreter::new(&self.inner, geometry);
        interp.run(&content.operations, resources, Ctm::identity(), 0)?;
        let edges = interp.into_edges();
        tracing::debug!(page = page.index + 1, edges = edges.len(), "collected edges");
        Ok(edges)
    }

    fn box_from_object(&self, obj: &lopdf::Object, key: &str) -> Result<BBox, BackendError> {
        let array = self
            .inner
            .dereference(obj)
            .and_then(|(_, o)| o.as_array())
            .map_err(|e| BackendError::Parse(format!("{key} is not an array: {e}")))?;
        extract_bbox_from_array(array)
    }
}

/// Extract a [`BBox`] from a lopdf array of 4 numbers `[x0, y0, x1, y1]`.
fn extract_bbox_from_array(array: &[lopdf::Object]) -> Result<BBox, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for box, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(&array[0])?;
    let y0 = object_to_f64(&array[1])?;
    let x1 = object_to_f64(&array[2])?;
    let y1 = object_to_f64(&array[3])?;
    Ok(BBox::new(x0, y0, x1, y1))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &lopdf::Object) -> Result<f64, BackendError> {
    match obj {
        lopdf::Object::Integer(i) => Ok(*i as f64),
        lopdf::Object::Real(f) => Ok(*f as f64),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let dict = doc
            .get_dictionary(current_id)
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(BackendError::Parse(format!(
        "page tree deeper than {MAX_PAGE_TREE_DEPTH} levels"
    )))
}
