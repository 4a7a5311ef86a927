//! Schema of the JSON experiment configuration
//!
//! Sections mirror the pipeline stages that consume them: `experiment`
//! identity, `data` source selection, `model` hyperparameters,
//! `trainer` loop settings, and `callbacks` output locations.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete experiment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Experiment identity and seed
    pub experiment: ExperimentInfo,

    /// Dataset source configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Model hyperparameters
    #[serde(default)]
    pub model: ModelSection,

    /// Training loop settings
    pub trainer: TrainerConfig,

    /// Checkpoint and metric-log output locations
    #[serde(default)]
    pub callbacks: CallbacksConfig,
}

impl ExperimentConfig {
    /// Resolved metric-log directory.
    ///
    /// Falls back to `<root>/<YYYY-MM-DD>/<name>/logs` when the
    /// `callbacks` section leaves it unset.
    pub fn log_dir(&self) -> PathBuf {
        self.callbacks
            .tensorboard_log_dir
            .clone()
            .unwrap_or_else(|| self.derived_dir("logs"))
    }

    /// Resolved checkpoint directory, with the same date-stamped
    /// fallback as [`log_dir`](Self::log_dir).
    pub fn checkpoint_dir(&self) -> PathBuf {
        self.callbacks
            .checkpoint_dir
            .clone()
            .unwrap_or_else(|| self.derived_dir("checkpoints"))
    }

    fn derived_dir(&self, leaf: &str) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        self.experiment
            .root
            .join(date)
            .join(&self.experiment.name)
            .join(leaf)
    }
}

/// Experiment identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentInfo {
    /// Experiment name, used in derived output paths
    pub name: String,

    /// Root directory for derived experiment outputs
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Seed for shuffling and weight initialization
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from("experiments")
}

fn default_seed() -> u64 {
    42
}

/// Dataset source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Built-in MNIST dataset, downloaded and cached by burn
    #[default]
    Mnist,
    /// Deterministic in-memory digits for tests and offline smoke runs
    Synthetic,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Which dataset source to load
    #[serde(default)]
    pub source: DataSource,

    /// Samples per split for the synthetic source
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,

    /// Dataloader worker threads
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            num_samples: default_num_samples(),
            num_workers: default_num_workers(),
        }
    }
}

fn default_num_samples() -> usize {
    100
}

fn default_num_workers() -> usize {
    1
}

/// Model hyperparameters
///
/// The topology itself is fixed; only the sizes below and the
/// optimizer choice are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// Input shape as [height, width, channels]
    #[serde(default = "default_input_shape")]
    pub input_shape: [usize; 3],

    /// Number of output classes
    #[serde(default = "default_num_classes")]
    pub num_classes: usize,

    /// Width of the dense layer between flatten and the classifier
    #[serde(default = "default_hidden_size")]
    pub hidden_size: usize,

    /// Dropout probability applied after pooling and the dense layer
    #[serde(default = "default_dropout")]
    pub dropout: f64,

    /// Optimizer name: "adam" | "sgd"
    #[serde(default = "default_optimizer")]
    pub optimizer: String,

    /// Learning rate passed to the optimizer
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            input_shape: default_input_shape(),
            num_classes: default_num_classes(),
            hidden_size: default_hidden_size(),
            dropout: default_dropout(),
            optimizer: default_optimizer(),
            learning_rate: default_learning_rate(),
        }
    }
}

fn default_input_shape() -> [usize; 3] {
    [28, 28, 1]
}

fn default_num_classes() -> usize {
    10
}

fn default_hidden_size() -> usize {
    128
}

fn default_dropout() -> f64 {
    0.25
}

fn default_optimizer() -> String {
    "adam".to_string()
}

fn default_learning_rate() -> f64 {
    1e-3
}

/// Training loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of passes over the training split
    pub num_epochs: usize,

    /// Samples per training step
    pub batch_size: usize,
}

/// Checkpoint and metric-log output locations
///
/// Both directories are derived from the experiment name and today's
/// date when left unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbacksConfig {
    /// Directory for per-epoch metric logs
    #[serde(default)]
    pub tensorboard_log_dir: Option<PathBuf>,

    /// Directory for model checkpoints
    #[serde(default)]
    pub checkpoint_dir: Option<PathBuf>,

    /// How many trailing epoch checkpoints to keep, in addition to the
    /// best-validation-loss checkpoint which is always retained
    #[serde(default = "default_keep_checkpoints")]
    pub keep_checkpoints: usize,
}

impl Default for CallbacksConfig {
    fn default() -> Self {
        Self {
            tensorboard_log_dir: None,
            checkpoint_dir: None,
            keep_checkpoints: default_keep_checkpoints(),
        }
    }
}

fn default_keep_checkpoints() -> usize {
    2
}
