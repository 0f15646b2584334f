//! Transcription commands.
//!
//! One job at a time: submissions while a job is outstanding are rejected,
//! which also guarantees the resident model is never swapped while an
//! in-flight worker is reading it. Completion and errors reach the frontend
//! as separate events, so an error message can never be displayed as if it
//! were transcript text.

use tauri::{AppHandle, Emitter, Manager, State};

use opentranscribe_core::{Job, LoadReport, ModelVariant, audio, transcribe};

use crate::state::{AppState, JobState};

#[derive(serde::Serialize)]
pub struct StatusResponse {
    pub state: JobState,
    /// Resident model variant, if one is loaded
    pub model: Option<String>,
    /// Device the resident model landed on
    pub device: Option<String>,
}

/// Job state plus the resident model. Answers without waiting on the
/// manager, so it stays responsive during a model load.
#[tauri::command]
pub fn get_status(state: State<'_, AppState>) -> StatusResponse {
    let (model, device) = match state.resident_snapshot() {
        Some((model, device)) => (Some(model), Some(device)),
        None => (None, None),
    };
    StatusResponse {
        state: state.job_state(),
        model,
        device,
    }
}

#[tauri::command]
pub fn get_transcript(state: State<'_, AppState>) -> String {
    state.transcript()
}

/// Sync user edits of the displayed transcript back into the buffer
#[tauri::command]
pub fn set_transcript(state: State<'_, AppState>, text: String) {
    state.set_transcript(text);
}

/// Transcribe an audio file with the requested model variant.
///
/// Ensures the model is loaded (accelerated first, CPU fallback), runs the
/// blocking transcription on a background worker, and emits exactly one
/// `transcription-complete` or `transcription-error` event.
#[tauri::command]
pub async fn transcribe_file(app: AppHandle, path: String, model: String) -> Result<(), String> {
    let variant: ModelVariant = model.parse()?;

    let state = app.state::<AppState>();
    if !state.try_begin_job() {
        return Err("A transcription is already running".to_string());
    }

    // Run with guaranteed job-slot release on every exit path
    let result = run_job(&app, path, variant).await;
    app.state::<AppState>().finish_job();
    result
}

async fn run_job(app: &AppHandle, path: String, variant: ModelVariant) -> Result<(), String> {
    // Model loading is blocking (possible download + weight load); keep it
    // off the interactive thread. The state is re-fetched inside the task
    // because MutexGuards cannot cross it.
    let app_for_load = app.clone();
    let load_result = tauri::async_runtime::spawn_blocking(move || {
        let state = app_for_load.state::<AppState>();
        let mut manager = state.manager.lock().unwrap();
        manager.ensure_loaded(variant)
    })
    .await
    .map_err(|e| format!("Model load task failed: {e}"))?;

    let (handle, report) = load_result.map_err(|e| e.to_string())?;

    if let LoadReport::FellBack { reason } = &report {
        println!("Hardware acceleration unavailable, falling back to CPU: {reason}");
        let _ = app.emit("model-fallback", reason.clone());
    }

    let state = app.state::<AppState>();
    state.set_job_state(JobState::Transcribing);
    let _ = app.emit("transcription-started", ());
    println!("Transcribing {path}...");

    let language = state.settings.lock().unwrap().language.clone();
    let audio_path = std::path::PathBuf::from(path);

    // The worker owns its model handle; swapping variants later cannot
    // invalidate it, and closing the app just discards the late result.
    let job = Job::spawn(move || {
        let samples = audio::load_samples(&audio_path)?;
        transcribe::transcribe(handle.session(), &samples, language.as_deref())
    });

    // The job's outcome is delivered to the frontend exactly once, through
    // one of the two events below; the command itself resolves Ok either way
    match job.wait().await {
        Ok(text) => {
            state.set_transcript(text.clone());
            let preview: String = text.chars().take(50).collect();
            println!("Done: {preview}");
            let _ = app.emit("transcription-complete", &text);
        }
        Err(message) => {
            // Transcript buffer stays untouched; the frontend shows a dialog
            println!("Transcription failed: {message}");
            let _ = app.emit("transcription-error", &message);
        }
    }
    Ok(())
}
