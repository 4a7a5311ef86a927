//! Crate-level error type
//!
//! Startup errors (unreadable config, malformed JSON, failed
//! validation) are distinguished from filesystem and checkpoint
//! failures; anything raised inside burn's training loop itself
//! surfaces through burn's own reporting.

use crate::config::ValidationError;

/// Errors produced by the training pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Configuration parsed but failed validation
    #[error("invalid config: {0}")]
    Validation(#[from] ValidationError),

    /// Filesystem failure while preparing experiment directories
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Model weights could not be persisted
    #[error("checkpoint error: {0}")]
    Checkpoint(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
