//! Embeds a bitmap into an A4 portrait PDF, one image slice per page.
//!
//! The bitmap is scaled to the page width. Content taller than one page is cut into
//! horizontal bands; each band is its own Flate-compressed image XObject so no page
//! carries pixels it does not show.

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use crate::export::raster::Bitmap;

pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// A final band shorter than this is blank margin from rounding, not content.
const MIN_TRAILING_ROWS: u32 = 4;

const COMPRESSION_LEVEL: u8 = 6;

#[derive(Debug)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Bitmap rows covered by each page, as `(start, end)` ranges.
pub fn page_slices(width: u32, height: u32) -> Vec<(u32, u32)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let rows_per_page = ((A4_HEIGHT_PT * width as f32 / A4_WIDTH_PT).floor() as u32).max(1);

    let mut slices = Vec::new();
    let mut start = 0;
    while start < height {
        let end = (start + rows_per_page).min(height);
        if !slices.is_empty() && end - start < MIN_TRAILING_ROWS {
            break;
        }
        slices.push((start, end));
        start = end;
    }
    slices
}

pub fn write_pdf(bitmap: &Bitmap, title: &str) -> PdfDocument {
    let slices = page_slices(bitmap.width, bitmap.height);
    let pt_per_px = A4_WIDTH_PT / bitmap.width.max(1) as f32;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let info_id = Ref::new(3);
    // Three objects per page: page, content stream, image.
    let page_ref = |i: usize, offset: i32| Ref::new(4 + 3 * i as i32 + offset);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids((0..slices.len()).map(|i| page_ref(i, 0)))
        .count(slices.len() as i32);

    let image_name = Name(b"Im0");
    for (i, &(start, end)) in slices.iter().enumerate() {
        let (page_id, content_id, image_id) = (page_ref(i, 0), page_ref(i, 1), page_ref(i, 2));
        let rows = end - start;

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();

        let compressed = compress_to_vec_zlib(bitmap.rows(start, end), COMPRESSION_LEVEL);
        let mut image = pdf.image_xobject(image_id, &compressed);
        image.filter(Filter::FlateDecode);
        image.width(bitmap.width as i32);
        image.height(rows as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        // Image space is the unit square; scale it to the band and pin it to the top.
        let band_height = rows as f32 * pt_per_px;
        let mut content = Content::new();
        content.save_state();
        content.transform([
            A4_WIDTH_PT,
            0.0,
            0.0,
            band_height,
            0.0,
            A4_HEIGHT_PT - band_height,
        ]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(content_id, &content.finish());
    }

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(concat!("resume_api ", env!("CARGO_PKG_VERSION"))));

    PdfDocument {
        bytes: pdf.finish(),
        pages: slices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> Bitmap {
        Bitmap {
            width,
            height,
            rgb: vec![0xff; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_a4_sized_bitmap_is_one_page() {
        // 794x1123 CSS px at 2x.
        assert_eq!(page_slices(1588, 2246).len(), 1);
    }

    #[test]
    fn test_tall_bitmap_splits_across_pages() {
        let slices = page_slices(1588, 5000);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].0, 0);
        assert_eq!(slices.last().unwrap().1, 5000);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "slices must be contiguous");
        }
    }

    #[test]
    fn test_short_bitmap_is_one_page() {
        assert_eq!(page_slices(1588, 100), vec![(0, 100)]);
        assert!(page_slices(0, 100).is_empty());
    }

    #[test]
    fn test_pdf_structure() {
        let doc = write_pdf(&white(100, 400), "Alex Johnson");
        assert_eq!(doc.pages, 3);
        assert!(doc.bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&doc.bytes);
        assert!(text.contains("/FlateDecode"));
        assert!(text.contains("/Count 3"));
        assert!(text.contains("(Alex Johnson)"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}
