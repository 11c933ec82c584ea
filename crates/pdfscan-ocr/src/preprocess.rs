//! Bitmap cleanup before recognition: grayscale, autocontrast, median.

use image::{DynamicImage, GrayImage};
use imageproc::filter::median_filter;

/// Median window radius; 1 gives a 3×3 window.
const MEDIAN_RADIUS: u32 = 1;

/// Full cleanup chain applied to a rendered region.
pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let stretched = autocontrast(&gray);
    median_filter(&stretched, MEDIAN_RADIUS, MEDIAN_RADIUS)
}

/// Stretch the darkest present value to 0 and the lightest to 255.
///
/// An image with a single gray level is returned unchanged.
pub fn autocontrast(image: &GrayImage) -> GrayImage {
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for p in image.pixels() {
        lo = lo.min(p.0[0]);
        hi = hi.max(p.0[0]);
    }
    if hi <= lo {
        return image.clone();
    }

    let span = u32::from(hi - lo);
    let lut: Vec<u8> = (0..=255u8)
        .map(|v| {
            let v = u32::from(v.clamp(lo, hi) - lo);
            (v * 255 / span) as u8
        })
        .collect();

    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = lut[usize::from(p.0[0])];
    }
    out
}
