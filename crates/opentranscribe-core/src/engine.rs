//! Model loading and the inference-backend seam.
//!
//! `ModelLoader` separates the caching policy in [`crate::manager`] from the
//! whisper.cpp binding, so the fallback behavior can be tested without
//! real model weights.

use serde::Serialize;
use whisper_rs::{WhisperContext, WhisperContextParameters};

use crate::error::CoreError;
use crate::model::{self, ModelVariant};

/// Execution backend for model inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Platform GPU, whichever backend whisper.cpp was built with
    /// (CUDA, Metal, Vulkan)
    Accelerated,
    Cpu,
}

impl Device {
    pub fn label(&self) -> &'static str {
        match self {
            Device::Accelerated => "accelerated",
            Device::Cpu => "cpu",
        }
    }
}

/// Seam between the model cache and the underlying inference library
pub trait ModelLoader {
    type Session;

    fn load(&self, variant: ModelVariant, device: Device) -> Result<Self::Session, CoreError>;

    /// Device a fresh load should try first. Loaders that cannot actually
    /// accelerate must answer `Cpu`, so the resident device stays truthful.
    fn preferred_device(&self) -> Device {
        Device::Accelerated
    }
}

/// A loaded whisper.cpp model, ready to transcribe
pub struct WhisperSession {
    ctx: WhisperContext,
}

impl WhisperSession {
    pub(crate) fn context(&self) -> &WhisperContext {
        &self.ctx
    }
}

/// Production loader: ensures the weights are on disk, then builds a
/// whisper.cpp context on the requested device.
#[derive(Debug, Default, Clone)]
pub struct WhisperLoader;

impl ModelLoader for WhisperLoader {
    type Session = WhisperSession;

    fn load(&self, variant: ModelVariant, device: Device) -> Result<WhisperSession, CoreError> {
        let path = model::download::ensure(variant, |_, _| {})?;
        let path_str = path.to_str().ok_or_else(|| {
            CoreError::ModelLoad(format!("Model path is not valid UTF-8: {}", path.display()))
        })?;

        crate::verbose!("Loading whisper {} model on {}", variant, device.label());

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(device == Device::Accelerated);

        let ctx = WhisperContext::new_with_params(path_str, ctx_params)
            .map_err(|e| CoreError::ModelLoad(format!("{e} (device: {})", device.label())))?;

        Ok(WhisperSession { ctx })
    }

    /// Without a GPU backend compiled in, `use_gpu(true)` quietly runs on
    /// CPU; start on CPU instead so the reported device matches reality.
    fn preferred_device(&self) -> Device {
        if cfg!(any(feature = "cuda", feature = "metal", feature = "vulkan")) {
            Device::Accelerated
        } else {
            Device::Cpu
        }
    }
}
