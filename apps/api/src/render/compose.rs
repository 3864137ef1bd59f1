//! Lays a document out on a page according to a `Theme`.
//!
//! Content flows top to bottom in one or two columns. Each column keeps a cursor
//! (`Flow`) that wraps text with the static font metrics and advances by the line
//! box height. The page grows past A4 when the content is longer.

use crate::layout::{wrap_text, FontFamily, FontWeight};
use crate::models::{Education, Experience, ResumeData, SkillGroup};
use crate::render::format::{date_range, initials, level_fraction, visible_achievements};
use crate::render::theme::{Arrangement, HeaderStyle, Indicator, Palette, Side, Theme};
use crate::render::tree::{
    Anchor, Color, Node, Page, SectionKind, TextRun, PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};

const AVATAR_PX: f32 = 84.0;
const SIDEBAR_PADDING: f32 = 24.0;
const INDICATOR_WIDTH: f32 = 72.0;
const ENTRY_GAP: f32 = 12.0;
const EMBEDDED_IMAGE_PREFIX: &str = "data:image/";
const BULLET: &str = "\u{2022}";

#[derive(Debug, Clone, Copy)]
struct Style {
    font: FontFamily,
    size: f32,
    weight: FontWeight,
    color: Color,
    tracking: f32,
}

impl Style {
    fn width(&self, s: &str) -> f32 {
        self.font.measure_px(s, self.size, self.weight) + self.tracking * s.chars().count() as f32
    }
}

/// Vertical cursor over one column.
struct Flow {
    x: f32,
    width: f32,
    y: f32,
    leading: f32,
    ink: Palette,
    nodes: Vec<Node>,
}

impl Flow {
    fn new(x: f32, width: f32, y: f32, leading: f32, ink: Palette) -> Self {
        Flow {
            x,
            width,
            y,
            leading,
            ink,
            nodes: Vec::new(),
        }
    }

    /// Baseline of a line starting at the cursor.
    fn baseline(&self, size: f32) -> f32 {
        self.y + size * (self.leading - 1.0) / 2.0 + size * 0.8
    }

    fn advance(&mut self, size: f32) {
        self.y += size * self.leading;
    }

    fn gap(&mut self, px: f32) {
        self.y += px;
    }

    fn text(&mut self, x: f32, y: f32, content: impl Into<String>, style: Style, anchor: Anchor) {
        self.nodes.push(Node::Text(TextRun {
            x,
            y,
            content: content.into(),
            font: style.font,
            size: style.size,
            weight: style.weight,
            color: style.color,
            anchor,
            tracking: style.tracking,
        }));
    }

    fn paragraph(&mut self, text: &str, style: Style, anchor: Anchor) {
        let x = match anchor {
            Anchor::Start => self.x,
            Anchor::Middle => self.x + self.width / 2.0,
            Anchor::End => self.x + self.width,
        };
        for line in wrap_text(text, style.font, style.weight, style.size, self.width) {
            let y = self.baseline(style.size);
            self.text(x, y, line, style, anchor);
            self.advance(style.size);
        }
    }

    fn bullets<'s>(&mut self, items: impl Iterator<Item = &'s str>, style: Style) {
        let indent = style.size * 1.2;
        for item in items {
            let lines = wrap_text(item, style.font, style.weight, style.size, self.width - indent);
            for (i, line) in lines.into_iter().enumerate() {
                let y = self.baseline(style.size);
                if i == 0 {
                    self.text(self.x + 2.0, y, BULLET, style, Anchor::Start);
                }
                self.text(self.x + indent, y, line, style, Anchor::Start);
                self.advance(style.size);
            }
        }
    }

    /// Left text wrapped beside right-aligned text sharing the first baseline.
    fn row(&mut self, left: &str, left_style: Style, right: &str, right_style: Style) {
        let reserve = if right.is_empty() {
            0.0
        } else {
            right_style.width(right) + 12.0
        };
        let available = (self.width - reserve).max(self.width * 0.4);
        let lines = wrap_text(left, left_style.font, left_style.weight, left_style.size, available);

        if !right.is_empty() {
            let y = self.baseline(left_style.size);
            self.text(self.x + self.width, y, right, right_style, Anchor::End);
        }
        if lines.is_empty() {
            self.advance(left_style.size);
            return;
        }
        for line in lines {
            let y = self.baseline(left_style.size);
            self.text(self.x, y, line, left_style, Anchor::Start);
            self.advance(left_style.size);
        }
    }

    fn rule(&mut self, color: Color) {
        let y = self.y + 3.0;
        self.nodes.push(Node::Line {
            x1: self.x,
            y1: y,
            x2: self.x + self.width,
            y2: y,
            stroke: color,
            width: 1.0,
        });
        self.y += 10.0;
    }

    /// Runs `build` and wraps everything it emitted in a section node.
    fn section(&mut self, kind: SectionKind, build: impl FnOnce(&mut Flow)) {
        let outer = std::mem::take(&mut self.nodes);
        build(self);
        let children = std::mem::replace(&mut self.nodes, outer);
        self.nodes.push(Node::Section { kind, children });
    }
}

struct Composer<'a> {
    doc: &'a ResumeData,
    theme: &'a Theme,
}

impl Composer<'_> {
    fn body(&self, color: Color) -> Style {
        Style {
            font: self.theme.body_font,
            size: self.theme.sizes.body,
            weight: FontWeight::Regular,
            color,
            tracking: 0.0,
        }
    }

    fn strong(&self, color: Color) -> Style {
        Style {
            weight: FontWeight::Bold,
            ..self.body(color)
        }
    }

    fn small(&self, color: Color) -> Style {
        Style {
            size: self.theme.sizes.small,
            ..self.body(color)
        }
    }

    fn heading(&self, f: &mut Flow, label: &str) {
        let style = Style {
            font: self.theme.heading_font,
            size: self.theme.sizes.heading,
            weight: FontWeight::Bold,
            color: f.ink.accent,
            tracking: if self.theme.uppercase_headings { 1.0 } else { 0.0 },
        };
        f.paragraph(&self.theme.heading_text(label), style, Anchor::Start);
        if self.theme.heading_rule {
            let rule = f.ink.rule;
            f.rule(rule);
        } else {
            f.gap(4.0);
        }
    }

    fn contact_items(&self) -> Vec<&str> {
        let info = &self.doc.personal_info;
        [
            Some(info.email.as_str()),
            Some(info.phone.as_str()),
            Some(info.location.as_str()),
            info.website.as_deref(),
            info.linkedin.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
    }

    /// Profile image, or the initials on a filled circle.
    ///
    /// Only inline `data:image/` URIs are drawn; anything else falls back to initials.
    fn avatar(&self, x: f32, y: f32, ink: &Palette) -> Vec<Node> {
        let info = &self.doc.personal_info;
        if let Some(href) = info
            .profile_image
            .as_deref()
            .filter(|s| s.starts_with(EMBEDDED_IMAGE_PREFIX))
        {
            return vec![Node::Image {
                x,
                y,
                size: AVATAR_PX,
                href: href.to_string(),
                round: true,
            }];
        }

        let r = AVATAR_PX / 2.0;
        let (cx, cy) = (x + r, y + r);
        let mut nodes = vec![Node::Circle {
            cx,
            cy,
            r,
            fill: ink.accent,
        }];
        let letters = initials(&info.full_name);
        if !letters.is_empty() {
            let size = AVATAR_PX * 0.36;
            nodes.push(Node::Text(TextRun {
                x: cx,
                y: cy + size * 0.35,
                content: letters,
                font: self.theme.heading_font,
                size,
                weight: FontWeight::Bold,
                color: ink.background,
                anchor: Anchor::Middle,
                tracking: 0.0,
            }));
        }
        nodes
    }

    fn name_block(&self, f: &mut Flow, anchor: Anchor, with_avatar: bool) {
        let info = &self.doc.personal_info;
        let top = f.y;
        let full_width = f.width;
        let beside = with_avatar && anchor != Anchor::Middle;

        if with_avatar {
            if beside {
                let avatar = self.avatar(f.x + f.width - AVATAR_PX, top, &f.ink);
                f.nodes.extend(avatar);
                f.width -= AVATAR_PX + 16.0;
            } else {
                let avatar = self.avatar(f.x + (f.width - AVATAR_PX) / 2.0, top, &f.ink);
                f.nodes.extend(avatar);
                f.gap(AVATAR_PX + 12.0);
            }
        }

        let name = Style {
            font: self.theme.heading_font,
            size: self.theme.sizes.name,
            weight: FontWeight::Bold,
            color: f.ink.text,
            tracking: 0.0,
        };
        let title = Style {
            font: self.theme.body_font,
            size: self.theme.sizes.title,
            weight: FontWeight::Regular,
            color: f.ink.muted,
            tracking: 0.0,
        };
        f.paragraph(&info.full_name, name, anchor);
        f.paragraph(&info.title, title, anchor);

        if beside {
            f.width = full_width;
            f.y = f.y.max(top + AVATAR_PX);
        }
    }

    /// Contact details on one wrapped line under the name.
    fn contact_line(&self, f: &mut Flow, anchor: Anchor) {
        let items = self.contact_items();
        if items.is_empty() {
            return;
        }
        let style = self.small(f.ink.muted);
        f.section(SectionKind::Contact, |f| {
            f.gap(4.0);
            f.paragraph(&items.join("  |  "), style, anchor);
        });
    }

    /// Contact details one per line, under a heading.
    fn contact_list(&self, f: &mut Flow) {
        let items = self.contact_items();
        if items.is_empty() {
            return;
        }
        let style = self.small(f.ink.text);
        f.section(SectionKind::Contact, |f| {
            self.heading(f, self.theme.labels.contact);
            for item in &items {
                f.paragraph(item, style, Anchor::Start);
            }
        });
        f.gap(self.theme.section_gap);
    }

    fn header(&self, main: &mut Flow, side: Option<&mut Flow>) {
        let in_panel = side.is_some();
        let avatar_inline = self.theme.avatar && !in_panel;
        let mut band_bottom = None;

        match self.theme.header {
            HeaderStyle::Banner {
                background,
                text,
                muted,
            } => {
                let ink = Palette {
                    text,
                    muted,
                    accent: text,
                    rule: muted,
                    background,
                    ..self.theme.palette
                };
                let margin = self.theme.margin;
                let mut band = Flow::new(
                    margin,
                    PAGE_WIDTH_PX - 2.0 * margin,
                    margin * 0.75,
                    main.leading,
                    ink,
                );
                band.section(SectionKind::Header, |f| {
                    self.name_block(f, Anchor::Start, avatar_inline)
                });
                if !in_panel {
                    self.contact_line(&mut band, Anchor::Start);
                }
                band.gap(margin * 0.6);
                band.nodes.insert(
                    0,
                    Node::Rect {
                        x: 0.0,
                        y: 0.0,
                        width: PAGE_WIDTH_PX,
                        height: band.y,
                        fill: background,
                        radius: 0.0,
                    },
                );
                main.y = band.y + margin * 0.6;
                main.nodes.append(&mut band.nodes);
                band_bottom = Some(main.y);
            }
            HeaderStyle::Plain { rule } => {
                main.section(SectionKind::Header, |f| {
                    self.name_block(f, Anchor::Start, avatar_inline)
                });
                if !in_panel {
                    self.contact_line(main, Anchor::Start);
                }
                if rule {
                    let color = main.ink.rule;
                    main.gap(4.0);
                    main.rule(color);
                }
            }
            HeaderStyle::Centered { rule } => {
                main.section(SectionKind::Header, |f| {
                    self.name_block(f, Anchor::Middle, avatar_inline)
                });
                if !in_panel {
                    self.contact_line(main, Anchor::Middle);
                }
                if rule {
                    let color = main.ink.rule;
                    main.gap(4.0);
                    main.rule(color);
                }
            }
        }
        main.gap(self.theme.section_gap * 0.5);

        if let Some(panel) = side {
            if let Some(top) = band_bottom {
                panel.y = panel.y.max(top);
            }
            if self.theme.avatar {
                panel.section(SectionKind::Header, |f| {
                    let avatar = self.avatar(f.x + (f.width - AVATAR_PX) / 2.0, f.y, &f.ink);
                    f.nodes.extend(avatar);
                    f.gap(AVATAR_PX + 20.0);
                });
            }
            self.contact_list(panel);
        }
    }

    fn summary(&self, f: &mut Flow) {
        let summary = self.doc.personal_info.summary.trim();
        if summary.is_empty() {
            return;
        }
        let style = self.body(f.ink.text);
        f.section(SectionKind::Summary, |f| {
            self.heading(f, self.theme.labels.summary);
            f.paragraph(summary, style, Anchor::Start);
        });
        f.gap(self.theme.section_gap);
    }

    fn experience_entry(&self, f: &mut Flow, exp: &Experience) {
        let ink = f.ink;
        let text = self.body(ink.text);
        let dates = date_range(&exp.start_date, &exp.end_date, exp.currently_working);
        f.row(&exp.position, self.strong(ink.text), &dates, self.small(ink.muted));
        if !exp.company.trim().is_empty() {
            f.paragraph(&exp.company, self.body(ink.accent), Anchor::Start);
        }
        if !exp.description.trim().is_empty() {
            f.paragraph(&exp.description, text, Anchor::Start);
        }
        f.bullets(visible_achievements(&exp.achievements), text);
    }

    fn experience(&self, f: &mut Flow) {
        if self.doc.experiences.is_empty() {
            return;
        }
        f.section(SectionKind::Experience, |f| {
            self.heading(f, self.theme.labels.experience);
            for (i, exp) in self.doc.experiences.iter().enumerate() {
                if i > 0 {
                    f.gap(ENTRY_GAP);
                }
                self.experience_entry(f, exp);
            }
        });
        f.gap(self.theme.section_gap);
    }

    fn education_entry(&self, f: &mut Flow, edu: &Education) {
        let title = match (edu.degree.trim(), edu.field.trim()) {
            (degree, "") => degree.to_string(),
            ("", field) => field.to_string(),
            (degree, field) => format!("{degree} in {field}"),
        };
        let ink = f.ink;
        let dates = date_range(&edu.start_date, &edu.end_date, edu.currently_studying);
        f.row(&title, self.strong(ink.text), &dates, self.small(ink.muted));
        if !edu.institution.trim().is_empty() {
            f.paragraph(&edu.institution, self.body(ink.accent), Anchor::Start);
        }
        if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            f.paragraph(&format!("GPA: {gpa}"), self.small(ink.muted), Anchor::Start);
        }
        f.bullets(visible_achievements(&edu.achievements), self.body(ink.text));
    }

    fn education(&self, f: &mut Flow) {
        if self.doc.educations.is_empty() {
            return;
        }
        f.section(SectionKind::Education, |f| {
            self.heading(f, self.theme.labels.education);
            for (i, edu) in self.doc.educations.iter().enumerate() {
                if i > 0 {
                    f.gap(ENTRY_GAP);
                }
                self.education_entry(f, edu);
            }
        });
        f.gap(self.theme.section_gap);
    }

    fn indicator(&self, x: f32, mid: f32, fraction: f32, ink: &Palette) -> Vec<Node> {
        let steps = (fraction * 5.0).round() as usize;
        let step = INDICATOR_WIDTH / 5.0;
        let fill = |i: usize| if i < steps { ink.accent } else { ink.track };

        match self.theme.indicator {
            Indicator::Bar => vec![
                Node::Rect {
                    x,
                    y: mid - 3.0,
                    width: INDICATOR_WIDTH,
                    height: 6.0,
                    fill: ink.track,
                    radius: 3.0,
                },
                Node::Rect {
                    x,
                    y: mid - 3.0,
                    width: INDICATOR_WIDTH * fraction,
                    height: 6.0,
                    fill: ink.accent,
                    radius: 3.0,
                },
            ],
            Indicator::Dots => (0..5)
                .map(|i| Node::Circle {
                    cx: x + step * i as f32 + step / 2.0,
                    cy: mid,
                    r: 4.5,
                    fill: fill(i),
                })
                .collect(),
            Indicator::Pips => (0..5)
                .map(|i| Node::Rect {
                    x: x + step * i as f32 + (step - 9.0) / 2.0,
                    y: mid - 4.5,
                    width: 9.0,
                    height: 9.0,
                    fill: fill(i),
                    radius: 1.5,
                })
                .collect(),
            Indicator::Fraction => vec![Node::Text(TextRun {
                x: x + INDICATOR_WIDTH,
                y: mid + self.theme.sizes.small * 0.35,
                content: format!("{steps}/5"),
                font: self.theme.body_font,
                size: self.theme.sizes.small,
                weight: FontWeight::Regular,
                color: ink.muted,
                anchor: Anchor::End,
                tracking: 0.0,
            })],
        }
    }

    fn skill_group(&self, f: &mut Flow, group: &SkillGroup) {
        if !group.name.trim().is_empty() {
            let style = self.strong(f.ink.text);
            f.paragraph(&group.name, style, Anchor::Start);
        }
        let style = self.body(f.ink.text);
        for skill in &group.skills {
            let fraction = level_fraction(skill.level);
            let reserve = if fraction.is_some() {
                INDICATOR_WIDTH + 8.0
            } else {
                0.0
            };
            let lines = wrap_text(
                &skill.name,
                style.font,
                style.weight,
                style.size,
                f.width - reserve,
            );

            if let Some(fraction) = fraction {
                let mid = f.baseline(style.size) - style.size * 0.35;
                let indicator =
                    self.indicator(f.x + f.width - INDICATOR_WIDTH, mid, fraction, &f.ink);
                f.nodes.extend(indicator);
            }
            if lines.is_empty() {
                f.advance(style.size);
            }
            for line in lines {
                let (x, y) = (f.x, f.baseline(style.size));
                f.text(x, y, line, style, Anchor::Start);
                f.advance(style.size);
            }
        }
    }

    fn skills(&self, f: &mut Flow) {
        if self.doc.skill_groups.is_empty() {
            return;
        }
        f.section(SectionKind::Skills, |f| {
            self.heading(f, self.theme.labels.skills);
            for (i, group) in self.doc.skill_groups.iter().enumerate() {
                if i > 0 {
                    f.gap(8.0);
                }
                self.skill_group(f, group);
            }
        });
        f.gap(self.theme.section_gap);
    }
}

/// Projects `doc` onto a page using `theme`. Pure: equal inputs give equal pages.
pub fn compose(doc: &ResumeData, theme: &Theme) -> Page {
    let composer = Composer { doc, theme };
    let margin = theme.margin;
    let leading = theme.line_height;
    let palette = theme.palette;

    let (mut main, mut side, panel) = match theme.arrangement {
        Arrangement::SingleColumn => (
            Flow::new(margin, PAGE_WIDTH_PX - 2.0 * margin, margin, leading, palette),
            None,
            None,
        ),
        Arrangement::Sidebar {
            side,
            width,
            background,
            text,
            muted,
        } => {
            let (panel_x, main_x) = match side {
                Side::Left => (0.0, width + margin),
                Side::Right => (PAGE_WIDTH_PX - width, margin),
            };
            let ink = Palette {
                background,
                text,
                muted,
                accent: text,
                rule: muted,
                track: palette.track,
            };
            (
                Flow::new(main_x, PAGE_WIDTH_PX - width - 2.0 * margin, margin, leading, palette),
                Some(Flow::new(
                    panel_x + SIDEBAR_PADDING,
                    width - 2.0 * SIDEBAR_PADDING,
                    margin,
                    leading,
                    ink,
                )),
                Some((panel_x, width, background)),
            )
        }
    };

    composer.header(&mut main, side.as_mut());
    composer.summary(&mut main);
    composer.experience(&mut main);
    composer.education(&mut main);
    composer.skills(side.as_mut().unwrap_or(&mut main));

    let bottom = side.as_ref().map_or(main.y, |s| s.y.max(main.y));
    let height = PAGE_HEIGHT_PX.max((bottom + margin).ceil());

    let mut nodes = Vec::new();
    if let Some((x, width, fill)) = panel {
        nodes.push(Node::Rect {
            x,
            y: 0.0,
            width,
            height,
            fill,
            radius: 0.0,
        });
    }
    nodes.append(&mut main.nodes);
    if let Some(mut s) = side {
        nodes.append(&mut s.nodes);
    }

    Page {
        template: theme.template,
        width: PAGE_WIDTH_PX,
        height,
        background: palette.background,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{demo_document, TemplateId};
    use crate::render::theme::theme_for;

    fn compose_demo(template: TemplateId) -> Page {
        compose(&demo_document(), &theme_for(template))
    }

    fn all_texts(page: &Page) -> Vec<&TextRun> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a TextRun>) {
            for node in nodes {
                match node {
                    Node::Text(run) => out.push(run),
                    Node::Section { children, .. } => walk(children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&page.nodes, &mut out);
        out
    }

    #[test]
    fn test_date_range_is_right_aligned() {
        let page = compose_demo(TemplateId::Professional);
        let run = all_texts(&page)
            .into_iter()
            .find(|t| t.content == "Jan 2020 - Present")
            .expect("current role date");
        assert_eq!(run.anchor, Anchor::End);
        assert!((run.x - (PAGE_WIDTH_PX - 48.0)).abs() < 1e-3);
    }

    #[test]
    fn test_sidebar_background_spans_the_page() {
        let page = compose_demo(TemplateId::Modern);
        match &page.nodes[0] {
            Node::Rect { x, height, .. } => {
                assert_eq!(*x, 0.0);
                assert_eq!(*height, page.height);
            }
            other => panic!("expected sidebar rect, got {other:?}"),
        }
    }

    #[test]
    fn test_sidebar_holds_skills_and_contact() {
        let page = compose_demo(TemplateId::Technical);
        let skills_x: Vec<f32> = all_texts(&page)
            .into_iter()
            .filter(|t| t.content == "JavaScript")
            .map(|t| t.x)
            .collect();
        assert_eq!(skills_x.len(), 1);
        assert!(skills_x[0] > PAGE_WIDTH_PX - 230.0);
    }

    #[test]
    fn test_banner_is_painted_first() {
        let page = compose_demo(TemplateId::Executive);
        assert!(matches!(
            page.nodes[0],
            Node::Rect { x, y, width, .. } if x == 0.0 && y == 0.0 && width == PAGE_WIDTH_PX
        ));
    }

    #[test]
    fn test_long_content_grows_the_page() {
        let mut doc = demo_document();
        let template = doc.experiences[0].clone();
        for i in 0..30 {
            let mut exp = template.clone();
            exp.id = format!("extra-{i}");
            doc.experiences.push(exp);
        }
        let page = compose(&doc, &theme_for(TemplateId::Professional));
        assert!(page.height > PAGE_HEIGHT_PX);
        let max_baseline = all_texts(&page)
            .iter()
            .map(|t| t.y)
            .fold(0.0_f32, f32::max);
        assert!(max_baseline < page.height);
    }

    #[test]
    fn test_unrated_skill_has_no_indicator() {
        let mut doc = demo_document();
        for group in &mut doc.skill_groups {
            for skill in &mut group.skills {
                skill.level = None;
            }
        }
        let rated = compose(&demo_document(), &theme_for(TemplateId::Simple));
        let unrated = compose(&doc, &theme_for(TemplateId::Simple));
        let circles = |page: &Page| {
            fn count(nodes: &[Node]) -> usize {
                nodes
                    .iter()
                    .map(|n| match n {
                        Node::Circle { .. } => 1,
                        Node::Section { children, .. } => count(children),
                        _ => 0,
                    })
                    .sum()
            }
            count(&page.nodes)
        };
        // Simple draws five dots per rated skill plus the initials circle.
        assert_eq!(circles(&unrated), 1);
        assert_eq!(circles(&rated), 1 + 5 * 8);
    }

    #[test]
    fn test_gpa_shown_only_when_present() {
        let page = compose_demo(TemplateId::Professional);
        assert!(page.texts().contains(&"GPA: 3.8"));

        let mut doc = demo_document();
        doc.educations[0].gpa = Some("  ".to_string());
        let page = compose(&doc, &theme_for(TemplateId::Professional));
        assert!(!page.texts().iter().any(|t| t.starts_with("GPA")));
    }
}
