//! Edges: ruling segments derived from painted paths.
//!
//! Every straight segment of a painted path becomes an [`Edge`]; the table
//! finder only looks at the horizontal and vertical ones.

use crate::geometry::{Orientation, Point};

/// Which path construct an edge was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    /// A segment built with `m`/`l`.
    Line,
    /// One side of a rectangle built with `re`.
    Rect,
    /// Chord of a Bézier curve segment.
    Curve,
}

/// A line segment edge for table detection.
///
/// Coordinates use the top-left origin page space of [`BBox`](crate::BBox).
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Left x coordinate.
    pub x0: f64,
    /// Top y coordinate (distance from top of page).
    pub top: f64,
    /// Right x coordinate.
    pub x1: f64,
    /// Bottom y coordinate (distance from top of page).
    pub bottom: f64,
    pub orientation: Orientation,
    pub source: EdgeSource,
}

impl Edge {
    /// Length along the segment.
    pub fn length(&self) -> f64 {
        let dx = self.x1 - self.x0;
        let dy = self.bottom - self.top;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Tolerance for floating-point comparison when classifying edge orientation.
const EDGE_AXIS_TOLERANCE: f64 = 1e-6;

fn classify(start: Point, end: Point) -> Orientation {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    if dy < EDGE_AXIS_TOLERANCE {
        Orientation::Horizontal
    } else if dx < EDGE_AXIS_TOLERANCE {
        Orientation::Vertical
    } else {
        Orientation::Diagonal
    }
}

/// Build an edge from two page-space points.
pub fn edge_from_segment(start: Point, end: Point, source: EdgeSource) -> Edge {
    Edge {
        x0: start.x.min(end.x),
        top: start.y.min(end.y),
        x1: start.x.max(end.x),
        bottom: start.y.max(end.y),
        orientation: classify(start, end),
        source,
    }
}
