//! JSON experiment configuration
//!
//! The configuration is loaded once at process start into a typed
//! section tree and never mutated afterwards. Required-field and
//! range checks all happen at load time, so a bad configuration
//! surfaces as a single structured error before any directory,
//! dataset, or model resource is created.

mod loader;
mod schema;
mod validate;

pub use loader::load_config;
pub use schema::{
    CallbacksConfig, DataConfig, DataSource, ExperimentConfig, ExperimentInfo, ModelSection,
    TrainerConfig,
};
pub use validate::{validate_config, ValidationError};
