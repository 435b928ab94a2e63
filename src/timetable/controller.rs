use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::gateway::{GenerateRequest, RemoteGateway};
use crate::models::TimetableRecord;
use crate::timetable::fallback;

/// How the current record came to be, so the caller can pick the matching
/// chat copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Server payload was usable and adopted as-is.
    Generated,
    /// Server answered but the payload was error-flagged with no schedule
    /// text; a synthesized record was substituted.
    SubstitutedUnusable,
    /// The request itself failed (transport, timeout, non-2xx); a
    /// synthesized record was substituted.
    SubstitutedOffline,
}

/// Owns the in-memory timetable record and the one-outstanding-request
/// guard. The record is ephemeral: it is never persisted and is replaced
/// wholesale on every generation.
#[derive(Clone)]
pub struct TimetableController {
    gateway: RemoteGateway,
    current: Arc<Mutex<Option<TimetableRecord>>>,
    generating: Arc<AtomicBool>,
    clock: Arc<dyn Fn() -> DateTime<Local> + Send + Sync>,
}

impl TimetableController {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self::with_clock(gateway, Arc::new(Local::now))
    }

    pub fn with_clock(
        gateway: RemoteGateway,
        clock: Arc<dyn Fn() -> DateTime<Local> + Send + Sync>,
    ) -> Self {
        Self {
            gateway,
            current: Arc::new(Mutex::new(None)),
            generating: Arc::new(AtomicBool::new(false)),
            clock,
        }
    }

    pub async fn current(&self) -> Option<TimetableRecord> {
        self.current.lock().await.clone()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Discard the current record and produce a new one. A usable server
    /// payload always wins; anything else is substituted with a
    /// synthesized record, so this only fails when a generation is
    /// already in flight. Slot overrides are untouched either way.
    pub async fn generate(
        &self,
        goals: &[String],
        preferences: &str,
        user_id: &str,
    ) -> Result<(TimetableRecord, GenerationOutcome)> {
        if self.generating.swap(true, Ordering::SeqCst) {
            return Err(anyhow!("timetable generation already in progress"));
        }

        let result = self.generate_inner(goals, preferences, user_id).await;
        self.generating.store(false, Ordering::SeqCst);
        result
    }

    async fn generate_inner(
        &self,
        goals: &[String],
        preferences: &str,
        user_id: &str,
    ) -> Result<(TimetableRecord, GenerationOutcome)> {
        // Regenerate always discards the old record before the request.
        *self.current.lock().await = None;

        let request = GenerateRequest {
            goals: goals.to_vec(),
            preferences: preferences.to_string(),
            user_id: user_id.to_string(),
        };

        let (record, outcome) = match self.gateway.generate_timetable(&request).await {
            Ok(record) if record.is_usable() => {
                info!("Adopted server timetable for {}", record.date);
                (record, GenerationOutcome::Generated)
            }
            Ok(record) => {
                warn!(
                    "Server timetable unusable ({}); synthesizing fallback",
                    record.error.as_deref().unwrap_or("no error detail")
                );
                (
                    fallback::synthesize(goals, (self.clock)()),
                    GenerationOutcome::SubstitutedUnusable,
                )
            }
            Err(err) => {
                warn!("Timetable generation failed: {err:#}; synthesizing fallback");
                (
                    fallback::synthesize(goals, (self.clock)()),
                    GenerationOutcome::SubstitutedOffline,
                )
            }
        };

        *self.current.lock().await = Some(record.clone());
        Ok((record, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn usable_server_payload_is_adopted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timetable": {
                    "date": "2025-03-03",
                    "day": "Monday",
                    "night_focus": "Side Hustle",
                    "schedule_text": "Server knows best",
                    "generated_at": "2025-03-03T07:00:00Z"
                }
            })))
            .mount(&server)
            .await;

        let controller = TimetableController::new(RemoteGateway::new(server.uri()));
        let (record, outcome) = controller
            .generate(&goals(&["Ship it"]), "", "default_user")
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Generated);
        assert_eq!(record.schedule_text, "Server knows best");
        assert_eq!(controller.current().await.unwrap(), record);
    }

    #[tokio::test]
    async fn unusable_payload_substitutes_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timetable": { "error": "llm down", "schedule_text": "" }
            })))
            .mount(&server)
            .await;

        let controller = TimetableController::new(RemoteGateway::new(server.uri()));
        let (record, outcome) = controller
            .generate(&goals(&["Get fit"]), "", "default_user")
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::SubstitutedUnusable);
        assert!(record.is_usable());
        assert!(record.schedule_text.contains("Get fit"));
    }

    #[tokio::test]
    async fn error_flagged_payload_with_text_is_not_substituted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timetable": {
                    "date": "2025-03-03",
                    "day": "Monday",
                    "night_focus": "Side Hustle",
                    "schedule_text": "nonempty",
                    "generated_at": "2025-03-03T07:00:00Z",
                    "error": "degraded"
                }
            })))
            .mount(&server)
            .await;

        let controller = TimetableController::new(RemoteGateway::new(server.uri()));
        let (record, outcome) = controller
            .generate(&goals(&["Ship it"]), "", "default_user")
            .await
            .unwrap();

        // Server text wins even with the error flag set.
        assert_eq!(outcome, GenerationOutcome::Generated);
        assert_eq!(record.schedule_text, "nonempty");
    }

    #[tokio::test]
    async fn transport_failure_substitutes_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let controller = TimetableController::new(RemoteGateway::new(server.uri()));
        let (record, outcome) = controller
            .generate(&goals(&[]), "", "default_user")
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::SubstitutedOffline);
        assert!(!record.schedule_text.is_empty());
        assert!(controller.current().await.is_some());
    }

    #[tokio::test]
    async fn second_concurrent_generate_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-timetable"))
            .respond_with(
                ResponseTemplate::new(500).set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let controller = TimetableController::new(RemoteGateway::new(server.uri()));
        let first_goals = goals(&[]);
        let (first, second) = tokio::join!(
            controller.generate(&first_goals, "", "default_user"),
            async {
                // Let the first call claim the guard.
                tokio::time::sleep(Duration::from_millis(50)).await;
                controller.generate(&goals(&[]), "", "default_user").await
            }
        );

        assert!(first.is_ok());
        assert!(second.is_err());

        // Guard resets once the first call settles.
        assert!(controller
            .generate(&goals(&[]), "", "default_user")
            .await
            .is_ok());
    }
}
