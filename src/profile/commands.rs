use log::error;
use tauri::State;

use crate::{
    models::{ChatMessage, Role, UserProfile},
    profile::SetupDraft,
    view::ViewState,
    AppState,
};

#[tauri::command]
pub fn get_profile(state: State<'_, AppState>) -> Result<UserProfile, String> {
    Ok(state.profile.current())
}

/// Save the setup form. On success the modal closes and the backend's
/// confirmation lands in the transcript; on failure the modal stays open
/// with the draft intact.
#[tauri::command]
pub async fn save_user_setup(
    state: State<'_, AppState>,
    draft: SetupDraft,
) -> Result<ViewState, String> {
    match state.profile.save_setup(&draft).await {
        Ok(message) => {
            state.chat.append(ChatMessage::new(Role::Bot, message)).await;
            Ok(state.view.close_setup())
        }
        Err(err) => {
            error!("Setup save failed: {err:#}");
            Err(err.to_string())
        }
    }
}
