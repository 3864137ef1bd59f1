//! Text formatting shared by every template.

use chrono::NaiveDate;

pub const PRESENT: &str = "Present";

/// Formats a stored `YYYY-MM` or `YYYY-MM-DD` date as `"Jan 2020"`.
///
/// Anything that does not parse is shown verbatim.
pub fn format_month(date: &str) -> String {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(d) => d.format("%b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// `"<start> - <end>"`, with `Present` for an ongoing or open-ended entry.
///
/// An empty start date renders only the end part.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current || end.trim().is_empty() {
        PRESENT.to_string()
    } else {
        format_month(end)
    };
    if start.trim().is_empty() {
        end
    } else {
        format!("{} - {end}", format_month(start))
    }
}

/// First letter of each whitespace-separated token, uppercased, at most two.
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Achievements with blank entries removed.
pub fn visible_achievements(achievements: &[String]) -> impl Iterator<Item = &str> {
    achievements
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
}

/// Proportion of the indicator to fill, or `None` when the skill has no level.
pub fn level_fraction(level: Option<u8>) -> Option<f32> {
    level.map(|l| f32::from(l.clamp(1, 5)) / 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_formats() {
        assert_eq!(format_month("2020-01"), "Jan 2020");
        assert_eq!(format_month("2018-09-15"), "Sep 2018");
    }

    #[test]
    fn test_unparseable_month_is_verbatim() {
        assert_eq!(format_month("Summer 2019"), "Summer 2019");
        assert_eq!(format_month("2019-13"), "2019-13");
    }

    #[test]
    fn test_current_range_reads_present() {
        assert_eq!(date_range("2020-01", "", true), "Jan 2020 - Present");
        assert_eq!(date_range("2020-01", "2021-06", true), "Jan 2020 - Present");
    }

    #[test]
    fn test_closed_range() {
        assert_eq!(date_range("2018-03", "2019-12", false), "Mar 2018 - Dec 2019");
    }

    #[test]
    fn test_missing_end_reads_present() {
        assert_eq!(date_range("2018-03", "", false), "Mar 2018 - Present");
    }

    #[test]
    fn test_missing_start_renders_end_only() {
        assert_eq!(date_range("", "2019-12", false), "Dec 2019");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alex Johnson"), "AJ");
        assert_eq!(initials("mary ann van der berg"), "MA");
        assert_eq!(initials("  cher "), "C");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_blank_achievements_are_hidden() {
        let list = vec!["".to_string(), "Shipped v2".to_string(), "  ".to_string()];
        assert_eq!(visible_achievements(&list).collect::<Vec<_>>(), vec!["Shipped v2"]);
    }

    #[test]
    fn test_level_fraction() {
        assert_eq!(level_fraction(None), None);
        assert_eq!(level_fraction(Some(5)), Some(1.0));
        assert_eq!(level_fraction(Some(3)), Some(0.6));
        assert_eq!(level_fraction(Some(9)), Some(1.0));
    }
}
