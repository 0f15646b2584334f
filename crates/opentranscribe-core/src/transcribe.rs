//! The single blocking transcription entry point.

use whisper_rs::{FullParams, SamplingStrategy};

use crate::engine::WhisperSession;
use crate::error::CoreError;

/// Transcribe 16kHz mono samples with a loaded model.
///
/// Blocking and CPU/accelerator-bound; callers run this on a worker, never
/// on the interactive thread.
pub fn transcribe(
    session: &WhisperSession,
    samples: &[f32],
    language: Option<&str>,
) -> Result<String, CoreError> {
    // Greedy sampling for speed (beam search is 2-3x slower)
    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

    let n_threads = std::thread::available_parallelism()
        .map(|p| (p.get() as i32).max(1))
        .unwrap_or(4);
    params.set_n_threads(n_threads);

    match language {
        Some(lang) => params.set_language(Some(lang)),
        None => params.set_language(Some("auto")),
    }

    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    let mut state = session
        .context()
        .create_state()
        .map_err(|e| CoreError::Transcription(format!("Failed to create state: {e}")))?;

    state
        .full(params, samples)
        .map_err(|e| CoreError::Transcription(format!("Inference failed: {e}")))?;

    let num_segments = state
        .full_n_segments()
        .map_err(|e| CoreError::Transcription(format!("Failed to get segments: {e}")))?;

    let mut text = String::new();
    for i in 0..num_segments {
        let segment = state
            .full_get_segment_text(i)
            .map_err(|e| CoreError::Transcription(format!("Failed to get text: {e}")))?;
        text.push_str(&segment);
    }

    Ok(text.trim().to_string())
}
