//! Transcript export command.

use std::path::PathBuf;

use tauri::State;

use opentranscribe_core::{ExportFormat, export};

use crate::state::AppState;

/// Export the current transcript to a file.
///
/// The format is taken from `format` when given, otherwise inferred from
/// the destination extension. I/O failures come back as reported errors;
/// they never crash the process.
#[tauri::command]
pub async fn export_transcript(
    state: State<'_, AppState>,
    path: String,
    format: Option<String>,
) -> Result<(), String> {
    let dest = PathBuf::from(path);

    let format = match format.as_deref() {
        Some("txt") => ExportFormat::Txt,
        Some("rtf") => ExportFormat::Rtf,
        Some("docx") => ExportFormat::Docx,
        Some(other) => return Err(format!("Unknown export format: {other}")),
        None => ExportFormat::from_path(&dest).ok_or_else(|| {
            format!(
                "Cannot infer export format from '{}'. Use .txt, .rtf, or .docx",
                dest.display()
            )
        })?,
    };

    let text = state.transcript();
    export::write(&dest, &text, format).map_err(|e| e.to_string())
}
