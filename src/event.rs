use serde::{Deserialize, Serialize};

/// Event fields guessed from a poster's OCR text.
///
/// Every field is always present; a field the heuristics could not find is
/// an empty string rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub description: String,
    /// OCR output exactly as the engine returned it
    pub raw_text: String,
}

impl EventRecord {
    /// True when none of the extracted fields carry anything
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.date.is_empty()
            && self.venue.is_empty()
            && self.description.is_empty()
    }
}
