//! Template projection: document -> visual tree -> SVG.
//!
//! `render` is a pure function of the document. The selected template string is
//! resolved to a `TemplateId` here, so unknown identifiers render as the default.

pub mod compose;
pub mod format;
pub mod handlers;
pub mod html;
pub mod svg;
pub mod theme;
pub mod tree;

pub use svg::to_svg;
pub use theme::theme_for;
pub use tree::{Page, SectionKind};

use crate::models::{ResumeData, TemplateId};

/// Renders `doc` with its selected template.
pub fn render(doc: &ResumeData) -> Page {
    render_with(doc, doc.template())
}

/// Renders `doc` with an explicit template, ignoring `selected_template`.
pub fn render_with(doc: &ResumeData, template: TemplateId) -> Page {
    compose::compose(doc, &theme_for(template))
}
