use serde::{Deserialize, Serialize};

/// A full day's plan, either adopted from the backend or synthesized
/// client-side. Replaced wholesale on regeneration; held in memory only.
///
/// The backend may return an error-flagged record with most fields blank,
/// so everything defaults during deserialization. `generated_at` is an
/// RFC 3339 string so records sort lexicographically by creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimetableRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub night_focus: String,
    #[serde(default)]
    pub schedule_text: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TimetableRecord {
    /// A record is usable when it has schedule text to show, or when no
    /// error is flagged at all. Only `error` set with an empty
    /// `schedule_text` counts as "no timetable".
    pub fn is_usable(&self) -> bool {
        self.error.is_none() || !self.schedule_text.is_empty()
    }
}
