pub mod commands;

use std::sync::{Arc, RwLock};

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::gateway::{RemoteGateway, SetupRequest};
use crate::models::UserProfile;

/// Editable setup-form contents. Goals arrive as one textarea, one goal
/// per line, exactly as the form collects them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetupDraft {
    pub bro_name: String,
    pub goals_text: String,
    pub preferences: String,
}

impl SetupDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            bro_name: profile.bro_name.clone(),
            goals_text: profile.goals.join("\n"),
            preferences: profile.preferences.clone(),
        }
    }

    pub fn parsed_goals(&self) -> Vec<String> {
        self.goals_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Optimistically cached profile. The cache is only overwritten after the
/// remote save confirms; until then the server copy stays authoritative.
#[derive(Clone)]
pub struct ProfileStore {
    gateway: RemoteGateway,
    current: Arc<RwLock<UserProfile>>,
}

impl ProfileStore {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self {
            gateway,
            current: Arc::new(RwLock::new(UserProfile::default())),
        }
    }

    pub fn current(&self) -> UserProfile {
        self.current.read().expect("profile lock poisoned").clone()
    }

    /// Refresh from the backend. Failure keeps the in-memory default and
    /// is logged only; the user never sees it.
    pub async fn load(&self) {
        let user_id = self.current().user_id;
        match self.gateway.fetch_profile(&user_id).await {
            Ok(profile) => {
                info!("Loaded profile for {}", profile.user_id);
                *self.current.write().expect("profile lock poisoned") = profile;
            }
            Err(err) => {
                warn!("Profile fetch failed, keeping defaults: {err:#}");
            }
        }
    }

    /// Two-phase save: POST first, overwrite the local cache only once the
    /// backend confirms. On failure the cache is untouched and the caller
    /// keeps the setup modal open.
    pub async fn save_setup(&self, draft: &SetupDraft) -> Result<String> {
        let user_id = self.current().user_id;
        let goals = draft.parsed_goals();

        let request = SetupRequest {
            user_id: user_id.clone(),
            bro_name: draft.bro_name.clone(),
            goals: goals.clone(),
            preferences: draft.preferences.clone(),
        };

        let reply = self.gateway.save_setup(&request).await?;

        {
            let mut current = self.current.write().expect("profile lock poisoned");
            current.bro_name = draft.bro_name.clone();
            current.goals = goals;
            current.preferences = draft.preferences.clone();
        }

        Ok(reply.message)
    }
}
