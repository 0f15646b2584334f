//! Persisted application settings.
//!
//! Stored as JSON under the user config directory; a missing or unreadable
//! file yields defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::ModelVariant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Model variant selected for transcription
    #[serde(default = "default_model")]
    pub model: ModelVariant,

    /// Language hint for transcription (None = auto-detect)
    #[serde(default)]
    pub language: Option<String>,
}

fn default_model() -> ModelVariant {
    crate::model::DEFAULT_MODEL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: None,
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opentranscribe")
            .join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save settings to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).context("Failed to write settings file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.model, ModelVariant::Small);
        assert!(settings.language.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            model: ModelVariant::Medium,
            language: Some("en".to_string()),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.model, ModelVariant::Medium);
        assert_eq!(loaded.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.model, ModelVariant::Small);
    }
}
