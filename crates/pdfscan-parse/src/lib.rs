//! pdfscan-parse: PDF parsing backend and ruling-line interpreter.
//!
//! Opens documents with lopdf, resolves page geometry (MediaBox, CropBox,
//! Rotate), extracts page text, and interprets content streams into the
//! [`Edge`](pdfscan_core::Edge)s consumed by table detection.

pub mod error;
pub mod interpreter;
pub mod lopdf_backend;
pub mod page_geometry;

pub use error::BackendError;
pub use lopdf_backend::{LopdfDocument, LopdfPage};
pub use page_geometry::PageGeometry;
pub use pdfscan_core;
