pub mod commands;
pub mod state;

use opentranscribe_core::{ModelManager, Settings, WhisperLoader};

use state::AppState;

pub fn run() {
    opentranscribe_core::init_from_env();

    let settings = Settings::load();
    let manager = ModelManager::new(WhisperLoader);

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::new(manager, settings))
        .invoke_handler(tauri::generate_handler![
            commands::get_status,
            commands::get_transcript,
            commands::set_transcript,
            commands::transcribe_file,
            commands::list_models,
            commands::download_model,
            commands::export_transcript,
            commands::get_settings,
            commands::save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running OpenTranscribe");
}
