//! Shared fixture builders for pdfscan integration tests.
//!
//! PDFs are built in memory with lopdf so the tests need no binary fixtures.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{Object, Stream, dictionary};

/// A 2×2 ruled grid spanning x 100..300 and PDF y 660..700.
///
/// On a 612×792 page its top-left bbox is `[100, 92, 300, 132]`.
pub const GRID_TOP: &[u8] = b"1 w \
100 700 m 300 700 l S 100 680 m 300 680 l S 100 660 m 300 660 l S \
100 700 m 100 660 l S 200 700 m 200 660 l S 300 700 m 300 660 l S";

/// A second 2×2 grid further down the page, bbox `[100, 292, 300, 332]`.
pub const GRID_LOWER: &[u8] = b"1 w \
100 500 m 300 500 l S 100 480 m 300 480 l S 100 460 m 300 460 l S \
100 500 m 100 460 l S 200 500 m 200 460 l S 300 500 m 300 460 l S";

/// Build a PDF with one 612×792 page per content stream.
pub fn pdf_with_pages(contents: &[&[u8]]) -> Vec<u8> {
    pdf_with_rotated_pages(contents, 0)
}

/// Like [`pdf_with_pages`], with every page carrying `/Rotate rotation`.
pub fn pdf_with_rotated_pages(contents: &[&[u8]], rotation: i64) -> Vec<u8> {
    build_pdf(contents, rotation, None)
}

/// Where a fixture's CropBox is stored.
#[derive(Debug, Clone, Copy)]
pub enum CropOn {
    Page,
    Parent,
}

/// Like [`pdf_with_pages`], with a `[x0 y0 x1 y1]` CropBox on each page or
/// on their shared `/Pages` node.
pub fn pdf_with_crop_box(contents: &[&[u8]], crop: [i64; 4], on: CropOn) -> Vec<u8> {
    build_pdf(contents, 0, Some((crop, on)))
}

fn build_pdf(contents: &[&[u8]], rotation: i64, crop: Option<([i64; 4], CropOn)>) -> Vec<u8> {
    let crop_array = |c: [i64; 4]| Object::Array(c.iter().map(|&v| v.into()).collect());
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids: Vec<Object> = Vec::new();
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Rotate" => rotation,
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        if let Some((c, CropOn::Page)) = crop {
            if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
                dict.set("CropBox", crop_array(c));
            }
        }
        kids.push(page_id.into());
    }

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => contents.len() as i64,
    };
    if let Some((c, CropOn::Parent)) = crop {
        pages.set("CropBox", crop_array(c));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Content stream drawing one line of text.
pub fn text_content(text: &str) -> Vec<u8> {
    format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET").into_bytes()
}

/// Write PDF bytes to a temp file that lives as long as the handle.
pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
