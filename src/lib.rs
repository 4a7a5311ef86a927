//! Minimal training template for a convolutional MNIST classifier.
//!
//! Wires four boilerplate stages together and runs one training
//! session: configuration loading, experiment directory setup, data
//! loading, and model construction feeding burn's fit loop. The
//! convolutional layers, the optimizer, the dataset source, and the
//! training loop itself all belong to burn; this crate only assembles
//! and parameterizes them from a JSON configuration file.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use conv_mnist::cli::{run, Cli};
//!
//! let cli = Cli::parse_from(["conv-mnist", "-c", "configs/conv_mnist.json"]);
//! run(cli).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod dirs;
pub mod error;
pub mod model;
pub mod train;

pub use error::{Error, Result};
