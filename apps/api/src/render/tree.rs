//! Visual tree produced by the template projection.
//!
//! Coordinates are CSS pixels (96 dpi) with the origin at the top-left of the page.
//! Text `y` is the baseline.

use serde::Serialize;

use crate::layout::{FontFamily, FontWeight};
use crate::models::TemplateId;

/// A4 at 96 dpi.
pub const PAGE_WIDTH_PX: f32 = 794.0;
pub const PAGE_HEIGHT_PX: f32 = 1123.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);

    pub const fn hex(rgb: u32) -> Color {
        Color((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Logical regions of a rendered resume. Empty sections are never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Header,
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub font: FontFamily,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub anchor: Anchor,
    /// Letter spacing in pixels; used for uppercase headings.
    pub tracking: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Color,
        radius: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Color,
        width: f32,
    },
    Text(TextRun),
    /// Square image clipped to a circle when `round` is set.
    Image {
        x: f32,
        y: f32,
        size: f32,
        href: String,
        round: bool,
    },
    Section {
        kind: SectionKind,
        children: Vec<Node>,
    },
}

/// One rendered resume. Height grows past A4 when the content needs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub template: TemplateId,
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub nodes: Vec<Node>,
}

impl Page {
    /// Section kinds in document order.
    pub fn sections(&self) -> Vec<SectionKind> {
        fn walk(nodes: &[Node], out: &mut Vec<SectionKind>) {
            for node in nodes {
                if let Node::Section { kind, children } = node {
                    out.push(*kind);
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections().contains(&kind)
    }

    /// All text content in paint order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_texts(&self.nodes, &mut out);
        out
    }

    /// Text content inside sections of `kind`.
    pub fn section_texts(&self, kind: SectionKind) -> Vec<&str> {
        fn find<'a>(nodes: &'a [Node], kind: SectionKind, out: &mut Vec<&'a str>) {
            for node in nodes {
                if let Node::Section { kind: k, children } = node {
                    if *k == kind {
                        collect_texts(children, out);
                    } else {
                        find(children, kind, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        find(&self.nodes, kind, &mut out);
        out
    }
}

fn collect_texts<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            Node::Text(run) => out.push(&run.content),
            Node::Section { children, .. } => collect_texts(children, out),
            _ => {}
        }
    }
}
