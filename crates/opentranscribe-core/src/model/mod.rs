//! Whisper model management: variant catalog and download utilities.

pub mod download;
pub mod variant;

pub use variant::ModelVariant;

/// Default model variant when no settings exist yet
pub const DEFAULT_MODEL: ModelVariant = ModelVariant::Small;
