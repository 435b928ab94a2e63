use std::collections::BTreeMap;

use chrono::Utc;
use log::warn;
use tauri::State;

use crate::{
    chat::{
        ChatController, GENERATE_PROMPT, GOALS_NUDGE, TIMETABLE_BACKUP, TIMETABLE_BASIC,
        TIMETABLE_READY,
    },
    models::{ChatMessage, Role, TimetableRecord},
    profile::ProfileStore,
    timetable::{present, GenerationOutcome, PresentMode, RenderModel, TimetableController},
    AppState,
};

#[tauri::command]
pub async fn get_timetable_view(
    state: State<'_, AppState>,
    mode: PresentMode,
) -> Result<RenderModel, String> {
    let record = state.timetable.current().await;
    let overrides = state
        .db
        .all_slot_overrides()
        .await
        .map_err(|e| e.to_string())?;

    Ok(present(record.as_ref(), &overrides, mode))
}

/// Kick off generation for the current profile. Returns `None` when the
/// goals gate fires (no goals set yet); in every other case a usable
/// record comes back, server-made or synthesized. The matching bot
/// message lands in the transcript either way.
#[tauri::command]
pub async fn generate_timetable(
    state: State<'_, AppState>,
) -> Result<Option<TimetableRecord>, String> {
    run_generation(&state.profile, &state.chat, &state.timetable)
        .await
        .map_err(|e| e.to_string())
}

pub(crate) async fn run_generation(
    profile: &ProfileStore,
    chat: &ChatController,
    timetable: &TimetableController,
) -> anyhow::Result<Option<TimetableRecord>> {
    let profile = profile.current();

    if profile.goals.is_empty() {
        chat.append(ChatMessage::new(Role::Bot, GOALS_NUDGE)).await;
        return Ok(None);
    }

    chat.append(ChatMessage::new(Role::User, GENERATE_PROMPT))
        .await;

    let (record, outcome) = timetable
        .generate(&profile.goals, &profile.preferences, &profile.user_id)
        .await?;

    let bot_turn = match outcome {
        GenerationOutcome::Generated => {
            ChatMessage::new(Role::Bot, TIMETABLE_READY).with_timetable(record.clone())
        }
        GenerationOutcome::SubstitutedUnusable => ChatMessage::new(Role::Bot, TIMETABLE_BASIC),
        GenerationOutcome::SubstitutedOffline => ChatMessage::new(Role::Bot, TIMETABLE_BACKUP),
    };
    chat.append(bot_turn).await;

    Ok(Some(record))
}

#[tauri::command]
pub async fn set_slot_override(
    state: State<'_, AppState>,
    slot_key: String,
    text: String,
) -> Result<(), String> {
    state
        .db
        .set_slot_override(&slot_key, &text, Utc::now())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_slot_overrides(
    state: State<'_, AppState>,
) -> Result<BTreeMap<String, String>, String> {
    state
        .db
        .all_slot_overrides()
        .await
        .map_err(|e| e.to_string())
}

/// Past timetables are nice-to-have; a failed fetch degrades to an empty
/// list rather than an error surface.
#[tauri::command]
pub async fn get_past_timetables(
    state: State<'_, AppState>,
    limit: Option<u32>,
) -> Result<Vec<TimetableRecord>, String> {
    let user_id = state.profile.current().user_id;
    match state
        .gateway
        .past_timetables(&user_id, limit.unwrap_or(10))
        .await
    {
        Ok(timetables) => Ok(timetables),
        Err(err) => {
            warn!("Past timetables fetch failed: {err:#}");
            Ok(Vec::new())
        }
    }
}
