pub mod audio;
pub mod engine;
pub mod error;
pub mod export;
pub mod job;
pub mod manager;
pub mod model;
pub mod settings;
pub mod transcribe;
pub mod verbose;

pub use engine::{Device, ModelLoader, WhisperLoader, WhisperSession};
pub use error::CoreError;
pub use export::ExportFormat;
pub use job::Job;
pub use manager::{LoadReport, ModelHandle, ModelManager};
pub use model::ModelVariant;
pub use settings::Settings;
pub use verbose::{init_from_env, set_verbose};
