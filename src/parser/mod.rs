//! Event field extraction from OCR text
//!
//! Line-based guesses over noisy poster text: the first line is the title,
//! the first date-shaped substring is the date, the first labelled line is
//! the venue and the next few lines make up the description. None of the
//! extractors can fail; each falls back to an empty string.
pub mod patterns;
pub mod utils;

use crate::event::EventRecord;
use log::debug;
pub use patterns::DateShape;
pub use utils::normalize_lines;

/// Upper bound on the description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// Lines after the title that make up the description
const DESCRIPTION_LINES: usize = 3;

/// A date found in the text together with the pattern that matched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch<'a> {
    pub text: &'a str,
    pub shape: DateShape,
}

/// Build an [`EventRecord`] from raw OCR output.
///
/// `text` is kept verbatim in `raw_text`.
pub fn parse_event(text: &str) -> EventRecord {
    let lines = normalize_lines(text);
    debug!("Parsing event from {} non-empty lines", lines.len());

    EventRecord {
        title: extract_title(&lines).to_string(),
        date: extract_date(&lines).map(|m| m.text).unwrap_or_default().to_string(),
        venue: extract_venue(&lines).unwrap_or_default().to_string(),
        description: extract_description(&lines),
        raw_text: text.to_string(),
    }
}

/// First non-empty line, or `""`
pub fn extract_title<'a>(lines: &[&'a str]) -> &'a str {
    lines.first().copied().unwrap_or_default()
}

/// First date on the earliest line that has one.
///
/// Lines are scanned in order and, within a line, patterns in priority
/// order; scanning stops at the first hit.
pub fn extract_date<'a>(lines: &[&'a str]) -> Option<DateMatch<'a>> {
    for line in lines {
        for (re, shape) in patterns::DATE_PATTERNS.iter() {
            if let Some(m) = re.find(line) {
                debug!("Matched {} date '{}' in line '{}'", shape, m.as_str(), line);
                return Some(DateMatch { text: m.as_str(), shape: *shape });
            }
        }
    }
    None
}

/// Text after the label on the first line that looks like a venue
pub fn extract_venue<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let caps = patterns::VENUE_PATTERN.captures(line)?;
        let venue = caps.get(2)?.as_str();
        debug!("Matched venue '{}' in line '{}'", venue, line);
        Some(venue)
    })
}

/// Lines 2 to 4 joined by spaces and capped at [`MAX_DESCRIPTION_CHARS`]
pub fn extract_description(lines: &[&str]) -> String {
    let joined = lines.iter().skip(1).take(DESCRIPTION_LINES).copied().collect::<Vec<_>>().join(" ");
    utils::truncate_chars(&joined, MAX_DESCRIPTION_CHARS).to_string()
}
