use tauri::State;

use crate::{models::ChatMessage, AppState};

#[tauri::command]
pub async fn send_chat_message(
    state: State<'_, AppState>,
    message: String,
) -> Result<Vec<ChatMessage>, String> {
    let user_id = state.profile.current().user_id;
    state
        .chat
        .send(&message, &user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_chat_messages(state: State<'_, AppState>) -> Result<Vec<ChatMessage>, String> {
    Ok(state.chat.messages().await)
}

#[tauri::command]
pub async fn get_latest_chat_messages(
    state: State<'_, AppState>,
    limit: usize,
) -> Result<Vec<ChatMessage>, String> {
    Ok(state.chat.latest(limit).await)
}
