mod chat;
mod db;
mod gateway;
mod models;
mod profile;
mod timetable;
mod trackers;
mod view;

use chat::commands::{get_chat_messages, get_latest_chat_messages, send_chat_message};
use chat::ChatController;
use db::Database;
use gateway::RemoteGateway;
use profile::commands::{get_profile, save_user_setup};
use profile::ProfileStore;
use tauri::Manager;
use timetable::commands::{
    generate_timetable, get_past_timetables, get_slot_overrides, get_timetable_view,
    set_slot_override,
};
use timetable::TimetableController;
use trackers::commands::{get_daily_log, get_tracker_data, save_daily_log};
use trackers::TrackerHub;
use view::commands::{
    close_feedback_modal, close_setup_modal, get_view_state, open_feedback_modal,
    open_setup_modal, set_active_section, toggle_tracker, update_setup_draft,
};
use view::ViewController;

const CHAT_HISTORY_LIMIT: u32 = 20;

pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) gateway: RemoteGateway,
    pub(crate) chat: ChatController,
    pub(crate) timetable: TimetableController,
    pub(crate) profile: ProfileStore,
    pub(crate) view: ViewController,
    pub(crate) trackers: TrackerHub,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Brolife starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let database = Database::new(app_data_dir.join("brolife.sqlite3"))?;

                let gateway = RemoteGateway::from_env();
                log::info!("Using backend at {}", gateway.base_url());

                let profile = ProfileStore::new(gateway.clone());
                let chat = ChatController::new(gateway.clone());
                let timetable = TimetableController::new(gateway.clone());

                // Hydrate the profile and chat history off the startup
                // path; both degrade silently when the backend is away.
                {
                    let profile = profile.clone();
                    let chat = chat.clone();
                    tauri::async_runtime::spawn(async move {
                        profile.load().await;
                        let user_id = profile.current().user_id;
                        chat.hydrate_history(&user_id, CHAT_HISTORY_LIMIT).await;
                    });
                }

                app.manage(AppState {
                    trackers: TrackerHub::new(database.clone()),
                    db: database,
                    gateway,
                    chat,
                    timetable,
                    profile,
                    view: ViewController::new(),
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            // Chat
            send_chat_message,
            get_chat_messages,
            get_latest_chat_messages,
            // Timetable
            generate_timetable,
            get_timetable_view,
            set_slot_override,
            get_slot_overrides,
            get_past_timetables,
            // Profile & setup
            get_profile,
            save_user_setup,
            // View state
            get_view_state,
            set_active_section,
            toggle_tracker,
            open_setup_modal,
            close_setup_modal,
            update_setup_draft,
            open_feedback_modal,
            close_feedback_modal,
            // Trackers & daily log
            get_tracker_data,
            save_daily_log,
            get_daily_log,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
