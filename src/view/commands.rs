use tauri::State;

use crate::{
    profile::SetupDraft,
    view::{Section, ViewState},
    AppState,
};

#[tauri::command]
pub fn get_view_state(state: State<'_, AppState>) -> Result<ViewState, String> {
    Ok(state.view.snapshot())
}

#[tauri::command]
pub fn set_active_section(
    state: State<'_, AppState>,
    section: Section,
) -> Result<ViewState, String> {
    Ok(state.view.set_section(section))
}

#[tauri::command]
pub fn toggle_tracker(
    state: State<'_, AppState>,
    tracker_id: String,
) -> Result<ViewState, String> {
    Ok(state.view.toggle_tracker(&tracker_id))
}

#[tauri::command]
pub fn open_setup_modal(state: State<'_, AppState>) -> Result<ViewState, String> {
    let profile = state.profile.current();
    Ok(state.view.open_setup(&profile))
}

#[tauri::command]
pub fn close_setup_modal(state: State<'_, AppState>) -> Result<ViewState, String> {
    Ok(state.view.close_setup())
}

#[tauri::command]
pub fn update_setup_draft(
    state: State<'_, AppState>,
    draft: SetupDraft,
) -> Result<ViewState, String> {
    Ok(state.view.update_setup_draft(draft))
}

#[tauri::command]
pub fn open_feedback_modal(state: State<'_, AppState>) -> Result<ViewState, String> {
    Ok(state.view.open_feedback())
}

#[tauri::command]
pub fn close_feedback_modal(state: State<'_, AppState>) -> Result<ViewState, String> {
    Ok(state.view.close_feedback())
}
