use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::TimetableRecord;
use crate::timetable::fallback::HUSTLE_FOCUS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PresentMode {
    Empty,
    Preview,
    Full,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DayBlock {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub range: String,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub slot_key: String,
    pub block: DayBlock,
    pub text: String,
    pub overridden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderModel {
    /// Call to action; the only state from which a first generation starts.
    Empty {
        heading: String,
        prompt: String,
        action_label: String,
    },
    /// Condensed four-block summary. Overrides are not applied here.
    Preview {
        day: String,
        date: String,
        night_focus: String,
        blocks: Vec<BlockSummary>,
        view_full_label: String,
    },
    /// The full editable timeline: 11 canonical sub-slots merged with
    /// the override map.
    Full {
        day: String,
        date: String,
        night_focus: String,
        schedule_text: String,
        slots: Vec<SlotView>,
    },
}

/// The fixed slot grid every schedule expands into. Overrides are keyed by
/// these labels, so they outlive any particular record.
const SLOTS: [(&str, DayBlock); 11] = [
    ("07:30", DayBlock::Morning),
    ("09:00", DayBlock::Morning),
    ("10:30", DayBlock::Morning),
    ("12:00", DayBlock::Afternoon),
    ("14:00", DayBlock::Afternoon),
    ("16:00", DayBlock::Afternoon),
    ("17:00", DayBlock::Evening),
    ("19:00", DayBlock::Evening),
    ("20:00", DayBlock::Evening),
    ("21:00", DayBlock::Night),
    ("23:00", DayBlock::Night),
];

fn default_label(slot_key: &str, night_focus: &str) -> &'static str {
    match slot_key {
        "07:30" => "Morning deep work",
        "09:00" => "Focused work blocks",
        "10:30" => "Deep work session",
        "12:00" => "Lunch break",
        "14:00" => "Project work",
        "16:00" => "Admin tasks and planning",
        "17:00" => "Exercise and personal time",
        "19:00" => "Dinner and relaxation",
        "20:00" => "Light reading or hobby time",
        "21:00" => {
            if night_focus == HUSTLE_FOCUS {
                "Personal projects"
            } else {
                "Wellness activities"
            }
        }
        "23:00" => "Wind down for sleep",
        _ => "Free time",
    }
}

fn empty_model() -> RenderModel {
    RenderModel::Empty {
        heading: "📅 No Timetable Yet".to_string(),
        prompt: "Generate your personalized daily schedule based on your goals and preferences."
            .to_string(),
        action_label: "🎯 Generate My Timetable".to_string(),
    }
}

/// Assemble the renderable schedule from the current record and the
/// override map. An absent or unusable record always yields the empty
/// model, whatever mode was asked for.
pub fn present(
    record: Option<&TimetableRecord>,
    overrides: &BTreeMap<String, String>,
    mode: PresentMode,
) -> RenderModel {
    let record = match record.filter(|r| r.is_usable()) {
        Some(record) => record,
        None => return empty_model(),
    };

    match mode {
        PresentMode::Empty => empty_model(),
        PresentMode::Preview => RenderModel::Preview {
            day: record.day.clone(),
            date: record.date.clone(),
            night_focus: record.night_focus.clone(),
            blocks: vec![
                BlockSummary {
                    range: "7:30-12:00".to_string(),
                    activity: "🌅 Morning Focus".to_string(),
                },
                BlockSummary {
                    range: "12:00-17:00".to_string(),
                    activity: "☀️ Mixed Tasks".to_string(),
                },
                BlockSummary {
                    range: "17:00-21:00".to_string(),
                    activity: "🌆 Personal Time".to_string(),
                },
                BlockSummary {
                    range: "21:00-00:30".to_string(),
                    activity: format!("🌙 {}", record.night_focus),
                },
            ],
            view_full_label: "View Full Schedule".to_string(),
        },
        PresentMode::Full => {
            let slots = SLOTS
                .iter()
                .map(|(slot_key, block)| match overrides.get(*slot_key) {
                    Some(text) => SlotView {
                        slot_key: slot_key.to_string(),
                        block: *block,
                        text: text.clone(),
                        overridden: true,
                    },
                    None => SlotView {
                        slot_key: slot_key.to_string(),
                        block: *block,
                        text: default_label(slot_key, &record.night_focus).to_string(),
                        overridden: false,
                    },
                })
                .collect();

            RenderModel::Full {
                day: record.day.clone(),
                date: record.date.clone(),
                night_focus: record.night_focus.clone(),
                schedule_text: record.schedule_text.clone(),
                slots,
            }
        }
    }
}
