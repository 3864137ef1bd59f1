//! PDF export: render the document, rasterize at 2x, paginate onto A4.
//!
//! `export_pdf` works on an owned snapshot and produces the complete file in memory,
//! so a failure at any stage leaves nothing behind.

pub mod handlers;
pub mod pdf;
pub mod raster;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use resvg::usvg;
use thiserror::Error;
use tracing::info;

use crate::models::ResumeData;
use crate::render::{render, to_svg};

pub use pdf::write_pdf;
pub use raster::{Rasterizer, EXPORT_SCALE};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendered SVG could not be parsed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
}

#[derive(Debug)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// `resume_YYYY-MM-DD.pdf`
pub fn export_filename(date: NaiveDate) -> String {
    format!("resume_{}.pdf", date.format("%Y-%m-%d"))
}

pub fn export_pdf(
    doc: &ResumeData,
    rasterizer: &Rasterizer,
    date: NaiveDate,
) -> Result<ExportedPdf, ExportError> {
    let page = render(doc);
    let svg = to_svg(&page);
    let bitmap = rasterizer.rasterize(&svg, EXPORT_SCALE)?;

    let title = match doc.personal_info.full_name.trim() {
        "" => "Resume".to_string(),
        name => format!("{name} - Resume"),
    };
    let pdf = write_pdf(&bitmap, &title);

    info!(
        template = page.template.as_str(),
        width = bitmap.width,
        height = bitmap.height,
        pages = pdf.pages,
        bytes = pdf.bytes.len(),
        "PDF exported"
    );
    Ok(ExportedPdf {
        filename: export_filename(date),
        bytes: pdf.bytes,
        pages: pdf.pages,
    })
}

/// Allows one export at a time.
#[derive(Debug, Default)]
pub struct ExportGuard {
    busy: AtomicBool,
}

/// Held for the duration of an export; releases the guard when dropped.
#[derive(Debug)]
pub struct ExportPermit {
    guard: Arc<ExportGuard>,
}

impl ExportGuard {
    /// `None` while another export holds the permit.
    pub fn try_acquire(self: &Arc<Self>) -> Option<ExportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportPermit {
                guard: Arc::clone(self),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
