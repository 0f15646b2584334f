//! Conditional model caching with accelerated-then-CPU load fallback.
//!
//! The manager owns at most one resident model at a time. Handles hand out
//! shared references to the loaded session, so an in-flight transcription
//! keeps its model alive even if the manager swaps variants afterwards.

use std::sync::Arc;

use crate::engine::{Device, ModelLoader};
use crate::error::CoreError;
use crate::model::ModelVariant;

/// A loaded model identified by variant and the device it landed on
#[derive(Debug)]
pub struct ModelHandle<S> {
    variant: ModelVariant,
    device: Device,
    session: Arc<S>,
}

impl<S> Clone for ModelHandle<S> {
    fn clone(&self) -> Self {
        Self {
            variant: self.variant,
            device: self.device,
            session: Arc::clone(&self.session),
        }
    }
}

impl<S> ModelHandle<S> {
    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}

/// What `ensure_loaded` actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Requested variant was already resident; no load performed
    Cached,
    /// Fresh load succeeded on the given device
    Loaded(Device),
    /// Accelerated load failed; the same variant was loaded on CPU.
    /// The caller should surface this to the user as a notice.
    FellBack { reason: String },
}

/// Owns the single resident model and decides when a (re)load is needed
pub struct ModelManager<L: ModelLoader> {
    loader: L,
    resident: Option<ModelHandle<L::Session>>,
}

impl<L: ModelLoader> ModelManager<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            resident: None,
        }
    }

    /// The currently resident model, if any
    pub fn resident(&self) -> Option<&ModelHandle<L::Session>> {
        self.resident.as_ref()
    }

    /// Ensure the requested variant is loaded, reusing the resident model
    /// when the variant matches.
    ///
    /// A fresh load starts on the loader's preferred device. When that is
    /// the accelerated device, any failure retries the same variant on CPU.
    /// If both attempts fail, no model is resident afterwards.
    pub fn ensure_loaded(
        &mut self,
        variant: ModelVariant,
    ) -> Result<(ModelHandle<L::Session>, LoadReport), CoreError> {
        if let Some(handle) = &self.resident {
            if handle.variant == variant {
                return Ok((handle.clone(), LoadReport::Cached));
            }
        }

        // Release the old model before loading; a failed switch must not
        // leave a stale variant resident.
        self.resident = None;

        let (session, device, report) = match self.loader.preferred_device() {
            Device::Cpu => {
                let session = self.loader.load(variant, Device::Cpu)?;
                (session, Device::Cpu, LoadReport::Loaded(Device::Cpu))
            }
            Device::Accelerated => match self.loader.load(variant, Device::Accelerated) {
                Ok(session) => (
                    session,
                    Device::Accelerated,
                    LoadReport::Loaded(Device::Accelerated),
                ),
                Err(accel_err) => {
                    crate::verbose!(
                        "Accelerated load of {} failed ({}), retrying on CPU",
                        variant,
                        accel_err
                    );
                    let session = self.loader.load(variant, Device::Cpu)?;
                    (
                        session,
                        Device::Cpu,
                        LoadReport::FellBack {
                            reason: accel_err.to_string(),
                        },
                    )
                }
            },
        };

        let handle = ModelHandle {
            variant,
            device,
            session: Arc::new(session),
        };
        self.resident = Some(handle.clone());
        Ok((handle, report))
    }
}
