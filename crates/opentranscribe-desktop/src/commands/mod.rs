//! Tauri command handlers, organized by domain.

mod export;
mod models;
mod settings;
mod transcription;

pub use export::*;
pub use models::*;
pub use settings::*;
pub use transcription::*;
