//! pdfscan-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (BBox, Ctm, Edge) and the
//! lattice table detection pipeline used by pdfscan, plus the per-page and
//! per-table records that make up the extraction output.

pub mod edges;
pub mod error;
pub mod geometry;
pub mod record;
pub mod table;

pub use edges::{Edge, EdgeSource, edge_from_segment};
pub use error::PdfError;
pub use geometry::{BBox, Ctm, Orientation, Point};
pub use record::{PageRecord, TableRecord};
pub use table::{Cell, Table, TableFinder, TableSettings};
