use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimetableRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Set when a bot turn announces a freshly generated timetable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timetable: Option<TimetableRecord>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            timetable: None,
        }
    }

    pub fn with_timetable(mut self, timetable: TimetableRecord) -> Self {
        self.timetable = Some(timetable);
        self
    }
}
