//! Model catalog and download commands.

use tauri::{AppHandle, Emitter};

use opentranscribe_core::ModelVariant;
use opentranscribe_core::model::download;

/// Model catalog entry for the frontend picker
#[derive(serde::Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub description: String,
    pub installed: bool,
}

#[tauri::command]
pub fn list_models() -> Vec<ModelEntry> {
    ModelVariant::all()
        .iter()
        .map(|variant| ModelEntry {
            name: variant.name().to_string(),
            description: variant.description().to_string(),
            installed: variant.is_installed(),
        })
        .collect()
}

/// Progress event payload for model download
#[derive(Clone, serde::Serialize)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: u64,
}

/// Download a model's weights, emitting `download-progress` events.
/// Returns the path where the weights were saved.
///
/// `ensure` serializes downloads internally, so a call racing a
/// transcription that needs the same weights waits instead of writing
/// over its temp file.
#[tauri::command]
pub async fn download_model(app: AppHandle, model: String) -> Result<String, String> {
    let variant: ModelVariant = model.parse()?;

    tauri::async_runtime::spawn_blocking(move || {
        let path = download::ensure(variant, |downloaded, total| {
            let _ = app.emit("download-progress", DownloadProgress { downloaded, total });
        })
        .map_err(|e| e.to_string())?;

        Ok(path.to_string_lossy().to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}
