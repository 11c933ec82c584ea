//! Page coordinate normalization: rotation and CropBox transforms.
//!
//! Transforms coordinates from PDF native space (bottom-left origin)
//! to the visible page coordinate system (top-left origin), the same space
//! a rasterizer produces when it renders the page.

use pdfscan_core::{BBox, Point};

/// Page coordinate normalization configuration.
///
/// Transform pipeline:
///
/// 1. Offset from MediaBox origin
/// 2. Apply rotation (0°/90°/180°/270° clockwise)
/// 3. Offset by CropBox position (in rotated space)
/// 4. Y-flip (bottom-left → top-left origin)
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    rotation: i32,
    media_x0: f64,
    media_y0: f64,
    native_width: f64,
    native_height: f64,
    crop_rx0: f64,
    crop_ry0: f64,
    display_width: f64,
    display_height: f64,
}

/// Reorder a raw `[x0 y0 x1 y1]` box so that `x0 <= x1` and `y0 <= y1`.
///
/// The returned [`BBox`] carries PDF native values: `top` holds the lower y.
fn normalized(raw: BBox) -> BBox {
    BBox::new(
        raw.x0.min(raw.x1),
        raw.top.min(raw.bottom),
        raw.x0.max(raw.x1),
        raw.top.max(raw.bottom),
    )
}

impl PageGeometry {
    /// Create a new `PageGeometry` from page attributes.
    ///
    /// `media_box` and `crop_box` hold raw PDF array values
    /// (`x0`, `top` = lower y, `x1`, `bottom` = upper y). `rotation` is the
    /// `/Rotate` value; anything that is not a multiple of 90 is treated as 0.
    pub fn new(media_box: BBox, crop_box: Option<BBox>, rotation: i32) -> Self {
        let rotation = match rotation.rem_euclid(360) {
            r @ (90 | 180 | 270) => r,
            _ => 0,
        };

        let media = normalized(media_box);
        let crop = crop_box
            .map(normalized)
            // A CropBox outside the MediaBox is ignored
            .and_then(|c| c.intersection(&media))
            .unwrap_or(media);

        let native_width = media.width();
        let native_height = media.height();

        let cx0 = crop.x0 - media.x0;
        let cy0 = crop.top - media.top;
        let cx1 = crop.x1 - media.x0;
        let cy1 = crop.bottom - media.top;

        let (crop_rx0, crop_ry0, crop_rx1, crop_ry1) = match rotation {
            90 => (cy0, native_width - cx1, cy1, native_width - cx0),
            180 => (
                native_width - cx1,
                native_height - cy1,
                native_width - cx0,
                native_height - cy0,
            ),
            270 => (native_height - cy1, cx0, native_height - cy0, cx1),
            _ => (cx0, cy0, cx1, cy1),
        };

        Self {
            rotation,
            media_x0: media.x0,
            media_y0: media.top,
            native_width,
            native_height,
            crop_rx0,
            crop_ry0,
            display_width: crop_rx1 - crop_rx0,
            display_height: crop_ry1 - crop_ry0,
        }
    }

    /// Visible page width after rotation and cropping.
    pub fn width(&self) -> f64 {
        self.display_width
    }

    /// Visible page height after rotation and cropping.
    pub fn height(&self) -> f64 {
        self.display_height
    }

    /// Page rotation in degrees (0, 90, 180, or 270).
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// The visible page as a box at the origin.
    pub fn page_bbox(&self) -> BBox {
        BBox::new(0.0, 0.0, self.display_width, self.display_height)
    }

    /// Transform a point from PDF native space to top-left origin page space.
    pub fn normalize_point(&self, p: Point) -> Point {
        let px = p.x - self.media_x0;
        let py = p.y - self.media_y0;

        let (rx, ry) = match self.rotation {
            90 => (py, self.native_width - px),
            180 => (self.native_width - px, self.native_height - py),
            270 => (self.native_height - py, px),
            _ => (px, py),
        };

        Point::new(rx - self.crop_rx0, self.display_height - (ry - self.crop_ry0))
    }
}
