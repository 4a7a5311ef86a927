//! Training run wiring
//!
//! Wraps burn's `Learner` fit loop: dataloaders, checkpointing, and
//! per-epoch metric logging are all the library's machinery. This
//! module only parameterizes them from the experiment configuration
//! and reads the resulting metric curves back into memory.

mod history;
mod trainer;

pub use history::{EpochRecord, TrainingHistory};
pub use trainer::Trainer;
