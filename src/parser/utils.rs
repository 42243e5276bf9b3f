//! Text helpers shared by the field extractors

/// Split OCR text into trimmed, non-empty lines, keeping their order.
///
/// Only `\n` separates lines; a trailing `\r` from CRLF output is removed by
/// the trim. The trim also drops the ASCII separators U+001C..=U+001F.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(trim_line).filter(|line| !line.is_empty()).collect()
}

fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Keep at most `max_chars` characters of `text`, cutting on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        let text = "  Tech Meetup  \r\n\n\t\n12/05/2024\n   ";
        assert_eq!(normalize_lines(text), vec!["Tech Meetup", "12/05/2024"]);

        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines(" \n\t \r\n").is_empty());
    }

    #[test]
    fn test_normalize_lines_strips_separator_controls() {
        assert_eq!(normalize_lines("\x1cTitle\x1f\n\x1c\x1d\nx"), vec!["Title", "x"]);
        // only at the edges
        assert_eq!(normalize_lines("a\x1eb"), vec!["a\x1eb"]);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 2), "he");
        assert_eq!(truncate_chars("", 3), "");
        // multi-byte characters are never split
        assert_eq!(truncate_chars("été à Paris", 4), "été ");
    }
}
