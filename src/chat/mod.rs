pub mod commands;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::warn;
use tokio::sync::Mutex;

use crate::gateway::{ChatRequest, RemoteGateway};
use crate::models::{ChatMessage, Role};

// All user-visible canned copy lives here so the wording stays in one place.
pub const PLACEHOLDER_REPLY: &str =
    "Hey, I'm having some technical issues right now. Let me try again in a bit!";
pub const GOALS_NUDGE: &str =
    "Hey! Set up your goals first so I can create a personalized timetable for you. Click the profile tab! 🎯";
pub const GENERATE_PROMPT: &str = "Generate my daily timetable";
pub const TIMETABLE_READY: &str =
    "Your personalized timetable is ready! Check it out in the Timetable tab 📅";
pub const TIMETABLE_BASIC: &str =
    "I generated a basic timetable for you! While my AI brain is having a moment, here's a solid schedule based on your goals. Check it out in the Timetable tab! 📅";
pub const TIMETABLE_BACKUP: &str =
    "I created a backup schedule for you! My AI is having a moment, but I won't leave you hanging. Check your timetable! 📅";

/// Ordered, append-only message log. Insertion order is display order;
/// nothing here reorders or deletes.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn latest(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Insert already-chronological history ahead of anything appended in
    /// this session. Used once at startup.
    pub fn prepend(&mut self, mut history: Vec<ChatMessage>) {
        history.append(&mut self.messages);
        self.messages = history;
    }
}

#[derive(Clone)]
pub struct ChatController {
    transcript: Arc<Mutex<Transcript>>,
    gateway: RemoteGateway,
    sending: Arc<AtomicBool>,
}

impl ChatController {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self {
            transcript: Arc::new(Mutex::new(Transcript::new())),
            gateway,
            sending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.all().to_vec()
    }

    pub async fn latest(&self, n: usize) -> Vec<ChatMessage> {
        self.transcript.lock().await.latest(n).to_vec()
    }

    pub async fn append(&self, message: ChatMessage) {
        self.transcript.lock().await.append(message);
    }

    /// Send a user turn and append exactly one bot turn once the gateway
    /// resolves. Whitespace-only input is a no-op; a second send while one
    /// is outstanding is rejected rather than interleaved. Gateway failure
    /// appends the fixed placeholder, never raw error text.
    pub async fn send(&self, input: &str, user_id: &str) -> Result<Vec<ChatMessage>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        if self.sending.swap(true, Ordering::SeqCst) {
            return Err(anyhow!("a chat message is already in flight"));
        }

        let result = self.send_inner(trimmed, user_id).await;
        self.sending.store(false, Ordering::SeqCst);
        result
    }

    async fn send_inner(&self, message: &str, user_id: &str) -> Result<Vec<ChatMessage>> {
        let user_turn = ChatMessage::new(Role::User, message);
        self.transcript.lock().await.append(user_turn.clone());

        let request = ChatRequest {
            message: message.to_string(),
            user_id: user_id.to_string(),
        };

        let bot_turn = match self.gateway.send_chat(&request).await {
            Ok(reply) => ChatMessage::new(Role::Bot, reply.response),
            Err(err) => {
                warn!("Chat send failed: {err:#}");
                ChatMessage::new(Role::Bot, PLACEHOLDER_REPLY)
            }
        };

        self.transcript.lock().await.append(bot_turn.clone());
        Ok(vec![user_turn, bot_turn])
    }

    /// Pull stored history and seed the transcript with it, oldest first.
    /// Failure leaves the transcript as it was; log only.
    pub async fn hydrate_history(&self, user_id: &str, limit: u32) {
        let turns = match self.gateway.chat_history(user_id, limit).await {
            Ok(turns) => turns,
            Err(err) => {
                warn!("Chat history fetch failed: {err:#}");
                return;
            }
        };

        // The backend returns newest first.
        let mut history = Vec::with_capacity(turns.len() * 2);
        for turn in turns.into_iter().rev() {
            let timestamp = turn
                .timestamp
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc));

            let mut user_turn = ChatMessage::new(Role::User, turn.message);
            let mut bot_turn = ChatMessage::new(Role::Bot, turn.response);
            if let Some(ts) = timestamp {
                user_turn.timestamp = ts;
                bot_turn.timestamp = ts;
            }
            history.push(user_turn);
            history.push(bot_turn);
        }

        self.transcript.lock().await.prepend(history);
    }
}
