/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Orientation of an axis-aligned (or not) segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Affine transformation matrix `[a b c d e f]` as used by the PDF `cm` operator.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ctm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Ctm {
    fn default() -> Self {
        Self::identity()
    }
}

impl Ctm {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Matrix product `self × other`: applying the result is the same as
    /// applying `self` first and then `other`.
    pub fn concat(&self, other: &Ctm) -> Ctm {
        Ctm {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow pdfplumber convention:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the box encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Overlapping region of two boxes, or `None` if they do not overlap.
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        let clipped = BBox {
            x0: self.x0.max(other.x0),
            top: self.top.max(other.top),
            x1: self.x1.min(other.x1),
            bottom: self.bottom.min(other.bottom),
        };
        (!clipped.is_empty()).then_some(clipped)
    }

    /// `[x0, top, x1, bottom]`, the order used in the JSON output.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.top, self.x1, self.bottom]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(bbox.width(), 40.0);
        assert_eq!(bbox.height(), 40.0);
        assert!(!bbox.is_empty());
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 30.0, 40.0);
        let b = BBox::new(5.0, 25.0, 35.0, 45.0);
        assert_eq!(a.union(&b), BBox::new(5.0, 20.0, 35.0, 45.0));
    }

    #[test]
    fn test_bbox_intersection_overlapping() {
        let a = BBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BBox::new(50.0, -10.0, 150.0, 60.0);
        assert_eq!(a.intersection(&b), Some(BBox::new(50.0, 0.0, 100.0, 60.0)));
    }

    #[test]
    fn test_bbox_intersection_disjoint() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_bbox_zero_height_is_empty() {
        assert!(BBox::new(0.0, 5.0, 10.0, 5.0).is_empty());
    }

    #[test]
    fn test_bbox_to_array_order() {
        let bbox = BBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ctm_identity_leaves_point() {
        let p = Ctm::identity().transform_point(Point::new(3.0, 4.0));
        assert_eq!(p, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_ctm_concat_applies_left_first() {
        let scale = Ctm::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let translate = Ctm::new(1.0, 0.0, 0.0, 1.0, 10.0, 5.0);
        // scale, then translate
        let m = scale.concat(&translate);
        assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 7.0));
        // translate, then scale
        let m = translate.concat(&scale);
        assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(22.0, 12.0));
    }
}
