//! Whisper model variants and their ggml file catalog.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Available Whisper model variants, trading size for accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelVariant {
    /// All variants, in size order
    pub fn all() -> &'static [ModelVariant] {
        &[
            ModelVariant::Tiny,
            ModelVariant::Base,
            ModelVariant::Small,
            ModelVariant::Medium,
            ModelVariant::Large,
        ]
    }

    /// Lowercase variant name as shown in the UI
    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Tiny => "tiny",
            ModelVariant::Base => "base",
            ModelVariant::Small => "small",
            ModelVariant::Medium => "medium",
            ModelVariant::Large => "large",
        }
    }

    /// Hugging Face URL for the ggml weights
    pub fn url(&self) -> &'static str {
        match self {
            ModelVariant::Tiny => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin"
            }
            ModelVariant::Base => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin"
            }
            ModelVariant::Small => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin"
            }
            ModelVariant::Medium => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin"
            }
            ModelVariant::Large => {
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large-v3.bin"
            }
        }
    }

    /// On-disk filename of the ggml weights
    pub fn filename(&self) -> &'static str {
        match self {
            ModelVariant::Tiny => "ggml-tiny.bin",
            ModelVariant::Base => "ggml-base.bin",
            ModelVariant::Small => "ggml-small.bin",
            ModelVariant::Medium => "ggml-medium.bin",
            ModelVariant::Large => "ggml-large-v3.bin",
        }
    }

    /// Approximate download size in MB
    pub fn size_mb(&self) -> u64 {
        match self {
            ModelVariant::Tiny => 75,
            ModelVariant::Base => 142,
            ModelVariant::Small => 466,
            ModelVariant::Medium => 1500,
            ModelVariant::Large => 3100,
        }
    }

    /// Short description for the model picker
    pub fn description(&self) -> &'static str {
        match self {
            ModelVariant::Tiny => "~75 MB - Fastest, lower quality",
            ModelVariant::Base => "~142 MB - Fast, decent quality",
            ModelVariant::Small => "~466 MB - Balanced (recommended)",
            ModelVariant::Medium => "~1.5 GB - Better quality, slower",
            ModelVariant::Large => "~3.1 GB - Best quality, slowest",
        }
    }

    /// Default path for this variant's weights
    pub fn default_path(&self) -> PathBuf {
        default_models_dir().join(self.filename())
    }

    /// Whether the weights are already on disk
    pub fn is_installed(&self) -> bool {
        let path = self.default_path();
        path.exists() && path.is_file()
    }
}

/// Get the default directory for storing whisper models
pub fn default_models_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opentranscribe")
        .join("models")
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(ModelVariant::Tiny),
            "base" => Ok(ModelVariant::Base),
            "small" => Ok(ModelVariant::Small),
            "medium" => Ok(ModelVariant::Medium),
            "large" => Ok(ModelVariant::Large),
            _ => Err(format!(
                "Unknown model: {}. Use tiny, base, small, medium, or large",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for variant in ModelVariant::all() {
            let parsed: ModelVariant = variant.name().parse().unwrap();
            assert_eq!(parsed, *variant);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("TINY".parse::<ModelVariant>().unwrap(), ModelVariant::Tiny);
        assert_eq!("Base".parse::<ModelVariant>().unwrap(), ModelVariant::Base);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "huge".parse::<ModelVariant>().unwrap_err();
        assert!(err.contains("tiny, base, small, medium, or large"));
    }

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(ModelVariant::all().len(), 5);
        for variant in ModelVariant::all() {
            assert!(variant.url().ends_with(".bin"));
            assert!(variant.default_path().ends_with(variant.filename()));
            assert!(variant.size_mb() > 0);
        }
    }
}
