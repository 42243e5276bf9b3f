use crate::event::EventRecord;
use crate::parser::parse_event;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn handle_parse(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    println!("{}", render_record(&parse_event(&text))?);
    Ok(())
}

/// Contents of `file`, or all of stdin when `None`
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

pub fn render_record(record: &EventRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to serialize event")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_read_input_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "Conference\n5 Jan 2025\nLocation - City Center")?;

        let text = read_input(Some(file.path()))?;
        let record = parse_event(&text);
        assert_eq!(record.venue, "City Center");
        Ok(())
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_render_record_is_json_object() -> Result<()> {
        let record = parse_event("Only Title");
        let json: serde_json::Value = serde_json::from_str(&render_record(&record)?)?;
        assert_eq!(json["title"], "Only Title");
        assert_eq!(json["description"], "");
        Ok(())
    }
}
