//! Compiled patterns used by the event extractor
//!
//! Patterns are compiled once on first use and shared read-only afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Which date shape a pattern recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `12/05/2024`, `1-2-2025` (day or month first, never validated)
    NumericDayFirst,
    /// `2024-05-12`, `2024/5/1`
    NumericYearFirst,
    /// `5 Jan 2025`, `12 september 2024`
    MonthName,
}

impl fmt::Display for DateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateShape::NumericDayFirst => "numeric-day-first",
            DateShape::NumericYearFirst => "numeric-year-first",
            DateShape::MonthName => "month-name",
        };
        f.write_str(name)
    }
}

/// Date patterns in priority order. The order matters: the first pattern that
/// matches a line wins even if a later one would match a longer span.
pub static DATE_PATTERNS: Lazy<Vec<(Regex, DateShape)>> = Lazy::new(|| {
    [
        (r"(?i)\d{1,2}[-/]\d{1,2}[-/]\d{4}", DateShape::NumericDayFirst),
        (r"(?i)\d{4}[-/]\d{1,2}[-/]\d{1,2}", DateShape::NumericYearFirst),
        (
            r"(?i)\d{1,2}\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}",
            DateShape::MonthName,
        ),
    ]
    .into_iter()
    .map(|(pattern, shape)| (Regex::new(pattern).expect("invalid date pattern"), shape))
    .collect()
});

/// Label followed by an optional `:`/`-` separator; group 2 is the venue.
///
/// `at` is matched anywhere in a line, so ordinary prose like "cat at the mat"
/// is picked up as a venue.
pub static VENUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(venue|location|at)\s*[:\-]?\s*(.+)").expect("invalid venue pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_patterns_keep_priority_order() {
        let shapes: Vec<DateShape> = DATE_PATTERNS.iter().map(|(_, shape)| *shape).collect();
        assert_eq!(
            shapes,
            vec![DateShape::NumericDayFirst, DateShape::NumericYearFirst, DateShape::MonthName]
        );
    }

    #[test]
    fn test_month_name_accepts_prefix_and_suffix() {
        let (re, _) = &DATE_PATTERNS[2];
        assert!(re.is_match("5 Jan 2025"));
        assert!(re.is_match("5 JANUARY 2025"));
        assert!(re.is_match("5 Jann 2025"));
        assert!(!re.is_match("5 Ja 2025"));
    }

    #[test]
    fn test_venue_pattern_captures_after_separator() {
        let caps = VENUE_PATTERN.captures("Venue: Main Hall").unwrap();
        assert_eq!(&caps[2], "Main Hall");

        let caps = VENUE_PATTERN.captures("LOCATION-Room 4").unwrap();
        assert_eq!(&caps[2], "Room 4");
    }
}
