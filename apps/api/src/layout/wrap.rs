//! Greedy word wrap against the static font metrics.

use crate::layout::font_metrics::{FontFamily, FontWeight};

/// Breaks `text` into lines no wider than `max_width_px`.
///
/// Explicit newlines start a new line; blank paragraphs are dropped. A single word
/// wider than the line is kept whole on its own line. Empty input yields no lines.
pub fn wrap_text(
    text: &str,
    font: FontFamily,
    weight: FontWeight,
    size_px: f32,
    max_width_px: f32,
) -> Vec<String> {
    let space = font.space_px(size_px, weight);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = font.measure_px(word, size_px, weight);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space + word_w > max_width_px {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(text, FontFamily::Inter, FontWeight::Regular, 10.0, width)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap("", 100.0).is_empty());
        assert!(wrap("   \n  ", 100.0).is_empty());
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        assert_eq!(wrap("Rust developer", 500.0), vec!["Rust developer"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "word ".repeat(40);
        let lines = wrap(&text, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            let w = FontFamily::Inter.measure_px(line, 10.0, FontWeight::Regular);
            assert!(w <= 120.0 + 1e-3, "line '{line}' is {w}px wide");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        let lines = wrap("Supercalifragilisticexpialidocious ok", 20.0);
        assert_eq!(lines, vec!["Supercalifragilisticexpialidocious", "ok"]);
    }

    #[test]
    fn test_newlines_start_new_lines() {
        assert_eq!(wrap("first\n\nsecond", 500.0), vec!["first", "second"]);
    }
}
