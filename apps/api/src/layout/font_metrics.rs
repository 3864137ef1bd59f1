//! Static font-metric tables for the resume font families.
//!
//! Widths are in em units (relative to font size). The renderer only needs to know
//! where lines break and how wide a right-aligned date is, so one measured table
//! (Inter) plus a per-family width ratio is close enough; the SVG rasterizer
//! does the real glyph shaping.
//! The table covers ASCII 0x20..=0x7E. Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Font families used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Clean humanist sans-serif.
    Inter,
    /// Old-style serif.
    EbGaramond,
    /// Geometric humanist sans-serif.
    Lato,
    /// Condensed display sans-serif.
    Oswald,
    /// Traditional TeX serif.
    ComputerModern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    pub fn css_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
        }
    }

    /// Bold glyphs run wider than the regular table.
    fn width_factor(self) -> f32 {
        match self {
            FontWeight::Regular => 1.0,
            FontWeight::Bold => 1.06,
        }
    }
}

impl FontFamily {
    /// CSS `font-family` list, with fallbacks the rasterizer is likely to find.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter, Helvetica, Arial, sans-serif",
            FontFamily::EbGaramond => "'EB Garamond', Garamond, Georgia, serif",
            FontFamily::Lato => "Lato, 'Segoe UI', Arial, sans-serif",
            FontFamily::Oswald => "Oswald, 'Arial Narrow', sans-serif",
            FontFamily::ComputerModern => "'CMU Serif', 'Latin Modern Roman', 'Times New Roman', serif",
        }
    }

    /// Width relative to Inter.
    fn width_ratio(self) -> f32 {
        match self {
            FontFamily::Inter => 1.0,
            FontFamily::EbGaramond => 0.85,
            FontFamily::Lato => 1.05,
            FontFamily::Oswald => 0.68,
            FontFamily::ComputerModern => 0.90,
        }
    }

    /// Rendered width of `s` in em units.
    ///
    /// Non-ASCII characters fall back to the average character width.
    pub fn measure_em(self, s: &str) -> f32 {
        let base: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    INTER_WIDTHS[code - 32]
                } else {
                    INTER_AVERAGE_CHAR_WIDTH
                }
            })
            .sum();
        base * self.width_ratio()
    }

    /// Rendered width of `s` in pixels at `size_px`.
    pub fn measure_px(self, s: &str, size_px: f32, weight: FontWeight) -> f32 {
        self.measure_em(s) * size_px * weight.width_factor()
    }

    pub fn space_px(self, size_px: f32, weight: FontWeight) -> f32 {
        INTER_WIDTHS[0] * self.width_ratio() * size_px * weight.width_factor()
    }
}

const INTER_AVERAGE_CHAR_WIDTH: f32 = 0.52;

/// Inter character widths.
#[rustfmt::skip]
static INTER_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(FontFamily::Inter.measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_ascii_characters() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = FontFamily::Inter.measure_em("Rust");
        assert!(
            (width - 2.00).abs() < 1e-3,
            "Rust width should be ~2.00, got {width}"
        );
    }

    #[test]
    fn test_measure_non_ascii_falls_back() {
        let width = FontFamily::Inter.measure_em("é");
        assert!((width - INTER_AVERAGE_CHAR_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn test_measure_px_scales_with_size() {
        let small = FontFamily::Lato.measure_px("Resume", 10.0, FontWeight::Regular);
        let large = FontFamily::Lato.measure_px("Resume", 20.0, FontWeight::Regular);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let regular = FontFamily::Inter.measure_px("Experience", 12.0, FontWeight::Regular);
        let bold = FontFamily::Inter.measure_px("Experience", 12.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_condensed_font_narrower_than_wide_font() {
        let text = "Architected distributed caching layer";
        assert!(FontFamily::Oswald.measure_em(text) < FontFamily::Lato.measure_em(text));
    }
}
