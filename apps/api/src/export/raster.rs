//! SVG -> RGB bitmap via resvg.

use std::path::Path;

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use tracing::{debug, info};

use crate::export::ExportError;

/// Raster scale applied to the CSS-pixel page for export.
pub const EXPORT_SCALE: f32 = 2.0;

/// Opaque 8-bit RGB pixels, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Bitmap {
    /// Rows `start..end` as a contiguous RGB buffer.
    pub fn rows(&self, start: u32, end: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        &self.rgb[start as usize * stride..end as usize * stride]
    }
}

/// Holds the parsed font database; building it is the slow part, so one instance
/// is shared by all exports.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    pub fn new(font_dir: Option<&Path>, system_fonts: bool) -> Self {
        let mut options = usvg::Options::default();
        {
            let fontdb = options.fontdb_mut();
            if system_fonts {
                fontdb.load_system_fonts();
            }
            if let Some(dir) = font_dir {
                fontdb.load_fonts_dir(dir);
            }
            info!(faces = fontdb.len(), "Font database loaded");
        }
        Rasterizer { options }
    }

    pub fn rasterize(&self, svg: &str, scale: f32) -> Result<Bitmap, ExportError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        // Opaque background, so premultiplied RGBA is plain RGBA.
        let rgb = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        debug!(width, height, "Rasterized page");
        Ok(Bitmap { width, height, rgb })
    }
}
