use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default_user";
pub const DEFAULT_BRO_NAME: &str = "Bro";

/// Single profile per client session. Field names stay snake_case because
/// this struct is the backend wire shape as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default = "default_bro_name")]
    pub bro_name: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub preferences: String,
}

fn default_bro_name() -> String {
    DEFAULT_BRO_NAME.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            bro_name: DEFAULT_BRO_NAME.to_string(),
            goals: Vec::new(),
            preferences: String::new(),
        }
    }
}
