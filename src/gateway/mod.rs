use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{TimetableRecord, UserProfile};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone, Serialize)]
pub struct SetupRequest {
    pub user_id: String,
    pub bro_name: String,
    pub goals: Vec<String>,
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub goals: Vec<String>,
    pub preferences: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupReply {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub bro_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReply {
    pub timetable: TimetableRecord,
}

/// One stored chat turn as the backend returns it: the user's message and
/// the bot's response together.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    pub message: String,
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct HistoryReply {
    history: Vec<HistoryTurn>,
}

#[derive(Debug, Clone, Deserialize)]
struct TimetablesReply {
    timetables: Vec<TimetableRecord>,
}

/// Thin wrapper around the backend's six resources. Failures are uniform:
/// transport errors, non-2xx statuses, and decode errors all collapse to
/// one `anyhow` error — callers never branch on the status class.
#[derive(Clone)]
pub struct RemoteGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `BROLIFE_BACKEND_URL`, falling back to the local
    /// development backend.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BROLIFE_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Same gateway with a per-request timeout. Opt-in; the default client
    /// waits indefinitely.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        let url = format!("{}/api/user/{user_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to fetch user profile")?
            .error_for_status()
            .context("user profile request rejected")?;

        response
            .json()
            .await
            .context("failed to decode user profile")
    }

    pub async fn save_setup(&self, request: &SetupRequest) -> Result<SetupReply> {
        let url = format!("{}/api/user/setup", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("failed to save user setup")?
            .error_for_status()
            .context("user setup request rejected")?;

        response.json().await.context("failed to decode setup reply")
    }

    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("failed to send chat message")?
            .error_for_status()
            .context("chat request rejected")?;

        response.json().await.context("failed to decode chat reply")
    }

    pub async fn chat_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryTurn>> {
        let url = format!("{}/api/chat-history/{user_id}?limit={limit}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to fetch chat history")?
            .error_for_status()
            .context("chat history request rejected")?;

        let reply: HistoryReply = response
            .json()
            .await
            .context("failed to decode chat history")?;
        Ok(reply.history)
    }

    pub async fn generate_timetable(&self, request: &GenerateRequest) -> Result<TimetableRecord> {
        let url = format!("{}/api/generate-timetable", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("failed to request timetable generation")?
            .error_for_status()
            .context("timetable generation request rejected")?;

        let reply: GenerateReply = response
            .json()
            .await
            .context("failed to decode timetable reply")?;
        Ok(reply.timetable)
    }

    pub async fn past_timetables(&self, user_id: &str, limit: u32) -> Result<Vec<TimetableRecord>> {
        let url = format!("{}/api/timetables/{user_id}?limit={limit}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to fetch past timetables")?
            .error_for_status()
            .context("past timetables request rejected")?;

        let reply: TimetablesReply = response
            .json()
            .await
            .context("failed to decode past timetables")?;
        Ok(reply.timetables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_profile_decodes_backend_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/default_user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": "default_user",
                "bro_name": "Coach",
                "goals": ["Learn Rust"],
                "preferences": "mornings"
            })))
            .mount(&server)
            .await;

        let gateway = RemoteGateway::new(server.uri());
        let profile = gateway.fetch_profile("default_user").await.unwrap();

        assert_eq!(profile.bro_name, "Coach");
        assert_eq!(profile.goals, vec!["Learn Rust".to_string()]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error_regardless_of_class() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/default_user"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gateway = RemoteGateway::new(server.uri());
        assert!(gateway.fetch_profile("default_user").await.is_err());
        assert!(gateway
            .send_chat(&ChatRequest {
                message: "hey".to_string(),
                user_id: "default_user".to_string(),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn generate_timetable_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timetable": {
                    "date": "2025-03-03",
                    "day": "Monday",
                    "night_focus": "Side Hustle",
                    "schedule_text": "Busy day ahead",
                    "generated_at": "2025-03-03T07:00:00Z"
                },
                "message": "Your timetable is ready!"
            })))
            .mount(&server)
            .await;

        let gateway = RemoteGateway::new(server.uri());
        let record = gateway
            .generate_timetable(&GenerateRequest {
                goals: vec!["Ship the app".to_string()],
                preferences: String::new(),
                user_id: "default_user".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(record.night_focus, "Side Hustle");
        assert!(record.is_usable());
    }

    #[tokio::test]
    async fn error_flagged_payload_still_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timetable": { "error": "llm unavailable", "schedule_text": "" }
            })))
            .mount(&server)
            .await;

        let gateway = RemoteGateway::new(server.uri());
        let record = gateway
            .generate_timetable(&GenerateRequest {
                goals: vec![],
                preferences: String::new(),
                user_id: "default_user".to_string(),
            })
            .await
            .unwrap();

        assert!(!record.is_usable());
        assert_eq!(record.error.as_deref(), Some("llm unavailable"));
    }

    #[tokio::test]
    async fn chat_history_passes_limit_and_unwraps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat-history/default_user"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": [
                    { "message": "yo", "response": "hey!", "timestamp": "2025-03-03T08:00:00Z" }
                ]
            })))
            .mount(&server)
            .await;

        let gateway = RemoteGateway::new(server.uri());
        let history = gateway.chat_history("default_user", 20).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].response, "hey!");
    }
}
