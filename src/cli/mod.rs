//! Command-line entry point and pipeline orchestration
//!
//! The pipeline is linear: load config → create the experiment dirs →
//! load the data → build the model → run the trainer. Any failure
//! stops the run; there is no retry or partial recovery.

mod logging;

pub use logging::{log, LogLevel};

use std::path::PathBuf;

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};
use burn::tensor::backend::Backend as _;
use clap::Parser;

use crate::config::load_config;
use crate::data::DigitData;
use crate::dirs::create_dirs;
use crate::error::Result;
use crate::model::ModelConfig;
use crate::train::Trainer;

/// Conv-MNIST: convolutional digit classifier training template
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "conv-mnist")]
#[command(version)]
#[command(about = "Train a convolutional MNIST classifier from a JSON experiment config")]
pub struct Cli {
    /// Path to the JSON experiment configuration
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Run the full training pipeline for the parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);

    let config = load_config(&cli.config)?;
    log(
        level,
        LogLevel::Normal,
        &format!("Experiment: {}", config.experiment.name),
    );

    create_dirs(&[config.log_dir(), config.checkpoint_dir()])?;

    type TrainingBackend = Autodiff<NdArray>;
    let device = NdArrayDevice::default();
    TrainingBackend::seed(config.experiment.seed);

    log(level, LogLevel::Normal, "Create the data loader.");
    let data = DigitData::load(&config);

    log(level, LogLevel::Normal, "Create the model.");
    let model = ModelConfig::from_experiment(&config).init::<TrainingBackend>(&device);

    log(level, LogLevel::Normal, "Create the trainer.");
    let trainer = Trainer::new(config);

    log(level, LogLevel::Normal, "Start training the model.");
    let history = trainer.fit(model, data, device)?;

    if let Some(loss) = history.final_metric("Loss") {
        log(
            level,
            LogLevel::Verbose,
            &format!("Final train loss: {loss:.4}"),
        );
    }
    log(level, LogLevel::Normal, "Training complete!");

    Ok(())
}
