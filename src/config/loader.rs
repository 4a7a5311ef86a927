//! Configuration loading

use std::fs;
use std::path::Path;

use super::schema::ExperimentConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Load and validate an experiment configuration from a JSON file.
///
/// All required-field and range checks happen here, before any
/// directory, dataset, or model resource is created.
///
/// # Example
///
/// ```no_run
/// use conv_mnist::config::load_config;
///
/// let config = load_config("configs/conv_mnist.json")?;
/// assert!(config.trainer.num_epochs > 0);
/// # Ok::<(), conv_mnist::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Config(format!(
            "failed to read config file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let config: ExperimentConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::Config(format!("failed to parse JSON config: {e}")))?;

    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"{
                "experiment": { "name": "conv_mnist", "seed": 7 },
                "data": { "source": "synthetic", "num_samples": 100 },
                "model": { "optimizer": "sgd", "learning_rate": 0.01 },
                "trainer": { "num_epochs": 1, "batch_size": 32 }
            }"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.experiment.name, "conv_mnist");
        assert_eq!(config.experiment.seed, 7);
        assert_eq!(config.data.source, DataSource::Synthetic);
        assert_eq!(config.model.optimizer, "sgd");
    }

    #[test]
    fn test_load_nonexistent_path() {
        let result = load_config("/nonexistent/path/to/config.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_config("{ this is not json");
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_required_section() {
        // No trainer section: must fail at load, not at first access
        let file = write_config(r#"{ "experiment": { "name": "x" } }"#);
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_invalid_config_fails_validation() {
        let file = write_config(
            r#"{
                "experiment": { "name": "x" },
                "trainer": { "num_epochs": 0, "batch_size": 32 }
            }"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_load_unknown_optimizer_fails_validation() {
        let file = write_config(
            r#"{
                "experiment": { "name": "x" },
                "model": { "optimizer": "rmsprop" },
                "trainer": { "num_epochs": 1, "batch_size": 32 }
            }"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
