//! SVG serialisation of a rendered page.
//!
//! The output is self-contained (images are data URIs) and is what both the browser
//! preview and the PDF rasterizer consume.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::render::tree::{Anchor, Node, Page, TextRun};

/// Escapes text for XML content and double-quoted attributes.
pub fn escape(s: &str) -> Cow<'_, str> {
    const SPECIAL: [char; 5] = ['<', '>', '&', '"', '\''];
    if !s.contains(SPECIAL) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Coordinate rounded to two decimals.
struct Num(f32);

impl Display for Num {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let v = (self.0 * 100.0).round() / 100.0;
        if v == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{v}")
        }
    }
}

/// Display adapter: `Svg(&page).to_string()`.
pub struct Svg<'a>(pub &'a Page);

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let page = self.0;
        let (w, h) = (Num(page.width), Num(page.height));
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-template="{}">"#,
            page.template.as_str()
        )?;
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
            page.background.css()
        )?;
        let mut clip_ids = 0;
        write_nodes(f, &page.nodes, &mut clip_ids)?;
        f.write_str("</svg>\n")
    }
}

pub fn to_svg(page: &Page) -> String {
    Svg(page).to_string()
}

fn write_nodes(f: &mut Formatter<'_>, nodes: &[Node], clip_ids: &mut usize) -> fmt::Result {
    for node in nodes {
        match node {
            Node::Rect {
                x,
                y,
                width,
                height,
                fill,
                radius,
            } => {
                write!(
                    f,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                    Num(*x),
                    Num(*y),
                    Num(*width),
                    Num(*height),
                    fill.css()
                )?;
                if *radius > 0.0 {
                    write!(f, r#" rx="{}""#, Num(*radius))?;
                }
                f.write_str("/>\n")?;
            }
            Node::Circle { cx, cy, r, fill } => writeln!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                Num(*cx),
                Num(*cy),
                Num(*r),
                fill.css()
            )?,
            Node::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                width,
            } => writeln!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                Num(*x1),
                Num(*y1),
                Num(*x2),
                Num(*y2),
                stroke.css(),
                Num(*width)
            )?,
            Node::Text(run) => write_text(f, run)?,
            Node::Image {
                x,
                y,
                size,
                href,
                round,
            } => {
                let clip = if *round {
                    *clip_ids += 1;
                    let id = format!("avatar-clip-{clip_ids}");
                    let r = size / 2.0;
                    writeln!(
                        f,
                        r#"<defs><clipPath id="{id}"><circle cx="{}" cy="{}" r="{}"/></clipPath></defs>"#,
                        Num(x + r),
                        Num(y + r),
                        Num(r)
                    )?;
                    Some(id)
                } else {
                    None
                };
                write!(
                    f,
                    r#"<image x="{}" y="{}" width="{s}" height="{s}" preserveAspectRatio="xMidYMid slice" xlink:href="{}""#,
                    Num(*x),
                    Num(*y),
                    escape(href),
                    s = Num(*size),
                )?;
                if let Some(id) = clip {
                    write!(f, r#" clip-path="url(#{id})""#)?;
                }
                f.write_str("/>\n")?;
            }
            Node::Section { kind, children } => {
                writeln!(f, r#"<g data-section="{}">"#, kind.as_str())?;
                write_nodes(f, children, clip_ids)?;
                f.write_str("</g>\n")?;
            }
        }
    }
    Ok(())
}

fn write_text(f: &mut Formatter<'_>, run: &TextRun) -> fmt::Result {
    let anchor = match run.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    write!(
        f,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{anchor}""#,
        Num(run.x),
        Num(run.y),
        escape(run.font.css_stack()),
        Num(run.size),
        run.weight.css_value(),
        run.color.css(),
    )?;
    if run.tracking > 0.0 {
        write!(f, r#" letter-spacing="{}""#, Num(run.tracking))?;
    }
    writeln!(f, r#" xml:space="preserve">{}</text>"#, escape(&run.content))
}
