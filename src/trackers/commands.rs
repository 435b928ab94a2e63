use tauri::State;

use crate::{
    models::{DailyLog, TrackerData},
    AppState,
};

#[tauri::command]
pub async fn get_tracker_data(state: State<'_, AppState>) -> Result<TrackerData, String> {
    state.trackers.snapshot().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_daily_log(
    state: State<'_, AppState>,
    log: DailyLog,
) -> Result<TrackerData, String> {
    state
        .trackers
        .save_daily_log(log)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_daily_log(
    state: State<'_, AppState>,
    date: String,
) -> Result<Option<DailyLog>, String> {
    state.trackers.daily_log(&date).await.map_err(|e| e.to_string())
}
