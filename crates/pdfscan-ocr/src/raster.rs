//! Region rasterization via poppler's `pdftoppm`.
//!
//! With `-cropbox`, `pdftoppm` renders the visible page (CropBox, after
//! /Rotate) with a top-left origin, so a region in page points maps to
//! pixels by a plain scale of `resolution / 72`.

use std::path::{Path, PathBuf};
use std::process::Command;

use pdfscan_core::BBox;

use crate::error::OcrError;

/// PDF user space unit in inches.
const POINTS_PER_INCH: f64 = 72.0;

/// A pixel rectangle in the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Clip `region` to `page` and convert it to pixels at `resolution` DPI.
///
/// The pixel rectangle covers every pixel the region touches: the origin
/// is floored and the far edge is ceiled.
pub fn pixel_region(region: &BBox, page: &BBox, resolution: u32) -> Result<PixelRegion, OcrError> {
    let clipped = region
        .intersection(page)
        .ok_or(OcrError::EmptyRegion(region.to_array()))?;

    let scale = f64::from(resolution) / POINTS_PER_INCH;
    let x0 = (clipped.x0 * scale).floor().max(0.0);
    let y0 = (clipped.top * scale).floor().max(0.0);
    let x1 = (clipped.x1 * scale).ceil();
    let y1 = (clipped.bottom * scale).ceil();

    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;
    if width == 0 || height == 0 {
        return Err(OcrError::EmptyRegion(region.to_array()));
    }
    Ok(PixelRegion {
        x: x0 as u32,
        y: y0 as u32,
        width,
        height,
    })
}

/// The `pdftoppm` invocation that renders `region` of page `page_number`
/// to `<prefix>.png`.
fn render_command(
    pdftoppm: &Path,
    pdf_path: &Path,
    page_number: usize,
    region: PixelRegion,
    resolution: u32,
    prefix: &Path,
) -> Command {
    let page = page_number.to_string();
    let dpi = resolution.to_string();
    let (x, y) = (region.x.to_string(), region.y.to_string());
    let (width, height) = (region.width.to_string(), region.height.to_string());

    // A relative path starting with '-' would be read as an option
    let pdf_path = if pdf_path.is_relative() {
        Path::new(".").join(pdf_path)
    } else {
        pdf_path.to_path_buf()
    };

    let mut cmd = Command::new(pdftoppm);
    cmd.args(["-f", page.as_str(), "-l", page.as_str(), "-r", dpi.as_str()])
        // Pixel offsets are measured from the CropBox, not the MediaBox
        .arg("-cropbox")
        .args(["-x", x.as_str(), "-y", y.as_str()])
        .args(["-W", width.as_str(), "-H", height.as_str()])
        .args(["-png", "-singlefile"])
        .arg(&pdf_path)
        .arg(prefix);
    cmd
}

/// Render one region of one page to `<dir>/region.png`.
///
/// `page_number` is 1-based, as `pdftoppm -f/-l` expect.
pub fn render_region(
    pdftoppm: &Path,
    pdf_path: &Path,
    page_number: usize,
    region: PixelRegion,
    resolution: u32,
    dir: &Path,
) -> Result<PathBuf, OcrError> {
    let prefix = dir.join("region");
    let output = render_command(pdftoppm, pdf_path, page_number, region, resolution, &prefix)
        .output()
        .map_err(|source| OcrError::Spawn {
            tool: pdftoppm.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(OcrError::ToolFailed {
            tool: pdftoppm.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // -singlefile writes exactly <prefix>.png
    let png = prefix.with_extension("png");
    if !png.is_file() {
        return Err(OcrError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("pdftoppm produced no output at {}", png.display()),
        )));
    }
    Ok(png)
}
