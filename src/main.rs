//! Conv-MNIST CLI
//!
//! Single-command training entry point: loads a JSON experiment
//! configuration, prepares the experiment directories, and runs one
//! training session of the convolutional digit classifier.
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! conv-mnist -c configs/conv_mnist.json
//!
//! # Offline smoke run on the synthetic source
//! conv-mnist -c configs/synthetic_smoke.json
//! ```

use clap::Parser;
use conv_mnist::cli::{run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
