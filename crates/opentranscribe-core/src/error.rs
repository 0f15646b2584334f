use thiserror::Error;

/// Errors surfaced by the core library.
///
/// The desktop layer converts these to strings at the command boundary;
/// nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to download model: {0}")]
    Download(String),
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    #[error("Failed to decode audio: {0}")]
    Decode(String),
    #[error("Transcription failed: {0}")]
    Transcription(String),
    #[error("Failed to export transcript: {0}")]
    Export(String),
}
