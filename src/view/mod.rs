pub mod commands;

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;
use crate::profile::SetupDraft;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Home,
    Chat,
    Timetable,
    Trackers,
    Profile,
}

impl Default for Section {
    fn default() -> Self {
        Section::Home
    }
}

/// Process-local UI state. Ephemeral by design: every launch starts from
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub active_section: Section,
    pub expanded_tracker: Option<String>,
    pub setup_open: bool,
    pub feedback_open: bool,
    pub setup_draft: Option<SetupDraft>,
}

/// All transitions are plain user-triggered writes. The only coupling is
/// the setup modal: opening seeds a draft from the profile, closing
/// without saving discards it wholesale.
#[derive(Clone, Default)]
pub struct ViewController {
    state: Arc<Mutex<ViewState>>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().expect("view lock poisoned").clone()
    }

    pub fn set_section(&self, section: Section) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        state.active_section = section;
        state.clone()
    }

    /// Expand a tracker, or collapse it when it is already the open one.
    pub fn toggle_tracker(&self, tracker_id: &str) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        if state.expanded_tracker.as_deref() == Some(tracker_id) {
            state.expanded_tracker = None;
        } else {
            state.expanded_tracker = Some(tracker_id.to_string());
        }
        state.clone()
    }

    pub fn open_setup(&self, profile: &UserProfile) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        state.setup_open = true;
        state.setup_draft = Some(SetupDraft::from_profile(profile));
        state.clone()
    }

    /// Closing without saving discards the draft; there is no partial
    /// merge back into the profile.
    pub fn close_setup(&self) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        state.setup_open = false;
        state.setup_draft = None;
        state.clone()
    }

    pub fn update_setup_draft(&self, draft: SetupDraft) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        if state.setup_open {
            state.setup_draft = Some(draft);
        }
        state.clone()
    }

    pub fn current_draft(&self) -> Option<SetupDraft> {
        self.state
            .lock()
            .expect("view lock poisoned")
            .setup_draft
            .clone()
    }

    pub fn open_feedback(&self) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        state.feedback_open = true;
        state.clone()
    }

    pub fn close_feedback(&self) -> ViewState {
        let mut state = self.state.lock().expect("view lock poisoned");
        state.feedback_open = false;
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_home_with_nothing_open() {
        let view = ViewController::new();
        let state = view.snapshot();
        assert_eq!(state.active_section, Section::Home);
        assert!(state.expanded_tracker.is_none());
        assert!(!state.setup_open);
        assert!(!state.feedback_open);
    }

    #[test]
    fn section_switches_are_unguarded_writes() {
        let view = ViewController::new();
        assert_eq!(view.set_section(Section::Chat).active_section, Section::Chat);
        assert_eq!(
            view.set_section(Section::Timetable).active_section,
            Section::Timetable
        );
    }

    #[test]
    fn tracker_toggle_collapses_on_second_tap() {
        let view = ViewController::new();
        assert_eq!(
            view.toggle_tracker("health").expanded_tracker.as_deref(),
            Some("health")
        );
        assert_eq!(
            view.toggle_tracker("food").expanded_tracker.as_deref(),
            Some("food")
        );
        assert!(view.toggle_tracker("food").expanded_tracker.is_none());
    }

    #[test]
    fn opening_setup_seeds_draft_from_profile() {
        let view = ViewController::new();
        let profile = UserProfile {
            bro_name: "Coach".to_string(),
            goals: vec!["Ship it".to_string()],
            ..UserProfile::default()
        };

        let state = view.open_setup(&profile);
        assert!(state.setup_open);
        let draft = state.setup_draft.unwrap();
        assert_eq!(draft.bro_name, "Coach");
        assert_eq!(draft.goals_text, "Ship it");
    }

    #[test]
    fn closing_setup_discards_edits() {
        let view = ViewController::new();
        view.open_setup(&UserProfile::default());
        view.update_setup_draft(SetupDraft {
            bro_name: "Changed".to_string(),
            goals_text: "New goal".to_string(),
            preferences: String::new(),
        });

        let state = view.close_setup();
        assert!(!state.setup_open);
        assert!(state.setup_draft.is_none());
    }

    #[test]
    fn draft_edits_are_ignored_when_modal_is_closed() {
        let view = ViewController::new();
        let state = view.update_setup_draft(SetupDraft {
            bro_name: "Ghost".to_string(),
            goals_text: String::new(),
            preferences: String::new(),
        });
        assert!(state.setup_draft.is_none());
    }

    #[test]
    fn modal_flags_are_independent() {
        let view = ViewController::new();
        view.open_setup(&UserProfile::default());
        let state = view.open_feedback();
        assert!(state.setup_open);
        assert!(state.feedback_open);

        let state = view.close_feedback();
        assert!(state.setup_open);
        assert!(!state.feedback_open);
    }
}
