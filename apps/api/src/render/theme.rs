//! Visual parameters for each template.
//!
//! A template is data, not code: `compose` reads a `Theme` and every template goes
//! through the same layout routine. `theme_for` is the single dispatch point and
//! matches every `TemplateId` exhaustively.

use crate::layout::FontFamily;
use crate::models::TemplateId;
use crate::render::tree::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// Where contact details and skills live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrangement {
    SingleColumn,
    /// A full-height side panel holding the avatar, contact details and skills.
    Sidebar {
        side: Side,
        width: f32,
        background: Color,
        text: Color,
        muted: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderStyle {
    /// Name at the left margin, optionally underlined by a full-width rule.
    Plain { rule: bool },
    /// Name centred over the column.
    Centered { rule: bool },
    /// Full-bleed coloured band across the top of the page.
    Banner { background: Color, text: Color, muted: Color },
}

/// How a skill level is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Horizontal track filled to level/5.
    Bar,
    /// Five circles, `level` of them filled.
    Dots,
    /// Five small squares, `level` of them filled.
    Pips,
    /// Plain `n/5` text.
    Fraction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub rule: Color,
    /// Unfilled part of a skill indicator.
    pub track: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Labels {
    pub contact: &'static str,
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
}

impl Labels {
    const STANDARD: Labels = Labels {
        contact: "Contact",
        summary: "Summary",
        experience: "Experience",
        education: "Education",
        skills: "Skills",
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    pub name: f32,
    pub title: f32,
    pub heading: f32,
    pub body: f32,
    pub small: f32,
}

impl Sizes {
    const REGULAR: Sizes = Sizes {
        name: 30.0,
        title: 16.0,
        heading: 15.0,
        body: 12.0,
        small: 11.0,
    };

    const COMPACT: Sizes = Sizes {
        name: 26.0,
        title: 14.0,
        heading: 13.0,
        body: 11.0,
        small: 10.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub template: TemplateId,
    pub arrangement: Arrangement,
    pub header: HeaderStyle,
    pub palette: Palette,
    pub heading_font: FontFamily,
    pub body_font: FontFamily,
    pub sizes: Sizes,
    /// Line box height as a multiple of the font size.
    pub line_height: f32,
    pub section_gap: f32,
    pub margin: f32,
    pub indicator: Indicator,
    pub avatar: bool,
    pub uppercase_headings: bool,
    /// Thin rule under each section heading.
    pub heading_rule: bool,
    pub labels: Labels,
}

const LIGHT: Palette = Palette {
    background: Color::WHITE,
    text: Color::hex(0x1f2937),
    muted: Color::hex(0x4b5563),
    accent: Color::hex(0x1e3a8a),
    rule: Color::hex(0xd1d5db),
    track: Color::hex(0xe5e7eb),
};

const DARK: Palette = Palette {
    background: Color::hex(0x111827),
    text: Color::hex(0xd1d5db),
    muted: Color::hex(0x9ca3af),
    accent: Color::hex(0x60a5fa),
    rule: Color::hex(0x374151),
    track: Color::hex(0x374151),
};

impl Theme {
    fn base(template: TemplateId) -> Theme {
        Theme {
            template,
            arrangement: Arrangement::SingleColumn,
            header: HeaderStyle::Plain { rule: true },
            palette: LIGHT,
            heading_font: FontFamily::Inter,
            body_font: FontFamily::Inter,
            sizes: Sizes::REGULAR,
            line_height: 1.45,
            section_gap: 22.0,
            margin: 48.0,
            indicator: Indicator::Bar,
            avatar: true,
            uppercase_headings: true,
            heading_rule: true,
            labels: Labels::STANDARD,
        }
    }

    pub fn heading_text(&self, label: &str) -> String {
        if self.uppercase_headings {
            label.to_uppercase()
        } else {
            label.to_string()
        }
    }
}

pub fn theme_for(template: TemplateId) -> Theme {
    let base = Theme::base(template);
    match template {
        TemplateId::Professional => Theme {
            labels: Labels {
                summary: "Professional Summary",
                experience: "Work Experience",
                ..Labels::STANDARD
            },
            ..base
        },
        TemplateId::Modern => Theme {
            arrangement: Arrangement::Sidebar {
                side: Side::Left,
                width: 250.0,
                background: Color::hex(0xf1f5f9),
                text: Color::hex(0x1e293b),
                muted: Color::hex(0x475569),
            },
            header: HeaderStyle::Plain { rule: false },
            palette: Palette {
                accent: Color::hex(0x2563eb),
                ..LIGHT
            },
            heading_font: FontFamily::Lato,
            body_font: FontFamily::Lato,
            indicator: Indicator::Dots,
            margin: 36.0,
            ..base
        },
        TemplateId::Creative => Theme {
            arrangement: Arrangement::Sidebar {
                side: Side::Left,
                width: 260.0,
                background: Color::hex(0xccfbf1),
                text: Color::hex(0x134e4a),
                muted: Color::hex(0x0f766e),
            },
            header: HeaderStyle::Plain { rule: false },
            palette: Palette {
                text: Color::hex(0x134e4a),
                muted: Color::hex(0x0f766e),
                accent: Color::hex(0x115e59),
                rule: Color::hex(0x99f6e4),
                track: Color::hex(0x99f6e4),
                ..LIGHT
            },
            heading_font: FontFamily::Oswald,
            body_font: FontFamily::Lato,
            indicator: Indicator::Pips,
            uppercase_headings: false,
            heading_rule: false,
            margin: 36.0,
            labels: Labels {
                summary: "About Me",
                ..Labels::STANDARD
            },
            ..base
        },
        TemplateId::Elegant => Theme {
            header: HeaderStyle::Centered { rule: true },
            palette: Palette {
                accent: Color::hex(0xfbbf24),
                rule: Color::hex(0x78350f),
                ..DARK
            },
            heading_font: FontFamily::EbGaramond,
            body_font: FontFamily::EbGaramond,
            sizes: Sizes {
                body: 13.0,
                small: 12.0,
                ..Sizes::REGULAR
            },
            indicator: Indicator::Dots,
            ..base
        },
        TemplateId::Minimalist => Theme {
            header: HeaderStyle::Plain { rule: false },
            palette: Palette {
                accent: Color::hex(0x374151),
                muted: Color::hex(0x6b7280),
                ..LIGHT
            },
            indicator: Indicator::Fraction,
            avatar: false,
            uppercase_headings: false,
            heading_rule: false,
            section_gap: 26.0,
            margin: 56.0,
            ..base
        },
        TemplateId::Technical => Theme {
            arrangement: Arrangement::Sidebar {
                side: Side::Right,
                width: 230.0,
                background: Color::hex(0x1f2937),
                text: Color::hex(0xdbeafe),
                muted: Color::hex(0x93c5fd),
            },
            header: HeaderStyle::Plain { rule: true },
            palette: DARK,
            indicator: Indicator::Bar,
            margin: 36.0,
            labels: Labels {
                skills: "Technical Skills",
                ..Labels::STANDARD
            },
            ..base
        },
        TemplateId::Executive => Theme {
            header: HeaderStyle::Banner {
                background: Color::hex(0x1f2937),
                text: Color::hex(0xfcd34d),
                muted: Color::hex(0xfef3c7),
            },
            palette: Palette {
                accent: Color::hex(0xb45309),
                ..LIGHT
            },
            heading_font: FontFamily::EbGaramond,
            labels: Labels {
                summary: "Executive Profile",
                experience: "Leadership Experience",
                skills: "Core Competencies",
                ..Labels::STANDARD
            },
            ..base
        },
        TemplateId::Academic => Theme {
            header: HeaderStyle::Centered { rule: true },
            palette: Palette {
                accent: Color::hex(0x1e3a8a),
                ..LIGHT
            },
            heading_font: FontFamily::ComputerModern,
            body_font: FontFamily::ComputerModern,
            indicator: Indicator::Fraction,
            avatar: false,
            labels: Labels {
                summary: "Research Interests",
                ..Labels::STANDARD
            },
            ..base
        },
        TemplateId::Simple => Theme {
            header: HeaderStyle::Plain { rule: false },
            palette: Palette {
                accent: Color::hex(0x111827),
                ..LIGHT
            },
            indicator: Indicator::Dots,
            heading_rule: false,
            ..base
        },
        TemplateId::CreativeFull => Theme {
            header: HeaderStyle::Banner {
                background: Color::hex(0x581c87),
                text: Color::hex(0xfbcfe8),
                muted: Color::hex(0xe9d5ff),
            },
            palette: Palette {
                background: Color::hex(0x0f172a),
                text: Color::hex(0xe2e8f0),
                muted: Color::hex(0xbfdbfe),
                accent: Color::hex(0xf9a8d4),
                rule: Color::hex(0x6b21a8),
                track: Color::hex(0x334155),
            },
            heading_font: FontFamily::Lato,
            body_font: FontFamily::Lato,
            indicator: Indicator::Pips,
            uppercase_headings: false,
            ..base
        },
        TemplateId::CompactDark => Theme {
            arrangement: Arrangement::Sidebar {
                side: Side::Right,
                width: 220.0,
                background: Color::hex(0x18181b),
                text: Color::hex(0xd4d4d8),
                muted: Color::hex(0x71717a),
            },
            header: HeaderStyle::Plain { rule: false },
            palette: Palette {
                background: Color::hex(0x000000),
                text: Color::hex(0xe4e4e7),
                muted: Color::hex(0x71717a),
                accent: Color::hex(0xd4d4d8),
                rule: Color::hex(0x27272a),
                track: Color::hex(0x27272a),
            },
            heading_font: FontFamily::Oswald,
            sizes: Sizes::COMPACT,
            line_height: 1.35,
            section_gap: 16.0,
            margin: 32.0,
            indicator: Indicator::Pips,
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_a_theme_for_itself() {
        for template in TemplateId::ALL {
            assert_eq!(theme_for(template).template, template);
        }
    }

    #[test]
    fn test_sidebars_leave_room_for_the_main_column() {
        for template in TemplateId::ALL {
            let theme = theme_for(template);
            if let Arrangement::Sidebar { width, .. } = theme.arrangement {
                let main = crate::render::tree::PAGE_WIDTH_PX - width - 2.0 * theme.margin;
                assert!(main > 350.0, "{template:?} main column is {main}px");
            }
        }
    }

    #[test]
    fn test_heading_case() {
        let professional = theme_for(TemplateId::Professional);
        assert_eq!(professional.heading_text("Skills"), "SKILLS");
        let creative = theme_for(TemplateId::Creative);
        assert_eq!(creative.heading_text("Skills"), "Skills");
    }
}
