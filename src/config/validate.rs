//! Configuration validation
//!
//! Checks numeric ranges and enumerated names once at load time.

use super::schema::{DataSource, ExperimentConfig};

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("experiment name cannot be empty")]
    EmptyExperimentName,

    #[error("invalid input shape: {0:?} (the fixed topology expects [28, 28, 1])")]
    InvalidInputShape([usize; 3]),

    #[error("invalid number of classes: {0} (must be > 0)")]
    InvalidNumClasses(usize),

    #[error("invalid hidden size: {0} (must be > 0)")]
    InvalidHiddenSize(usize),

    #[error("invalid dropout: {0} (must be in [0.0, 1.0))")]
    InvalidDropout(f64),

    #[error("invalid optimizer: {0} (must be one of: adam, sgd)")]
    InvalidOptimizer(String),

    #[error("invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f64),

    #[error("invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("invalid synthetic sample count: {0} (must be > 0)")]
    InvalidNumSamples(usize),

    #[error("invalid worker count: {0} (must be > 0)")]
    InvalidNumWorkers(usize),

    #[error("invalid checkpoint retention: {0} (must be > 0)")]
    InvalidKeepCheckpoints(usize),
}

/// Validate an experiment configuration.
///
/// Everything the pipeline later consumes is range-checked here so a
/// bad value cannot surface mid-training.
pub fn validate_config(config: &ExperimentConfig) -> Result<(), ValidationError> {
    if config.experiment.name.trim().is_empty() {
        return Err(ValidationError::EmptyExperimentName);
    }

    // The topology is hardcoded for 28x28 single-channel images
    if config.model.input_shape != [28, 28, 1] {
        return Err(ValidationError::InvalidInputShape(config.model.input_shape));
    }

    if config.model.num_classes == 0 {
        return Err(ValidationError::InvalidNumClasses(config.model.num_classes));
    }

    if config.model.hidden_size == 0 {
        return Err(ValidationError::InvalidHiddenSize(config.model.hidden_size));
    }

    if !(0.0..1.0).contains(&config.model.dropout) {
        return Err(ValidationError::InvalidDropout(config.model.dropout));
    }

    let valid_optimizers = ["adam", "sgd"];
    if !valid_optimizers.contains(&config.model.optimizer.to_lowercase().as_str()) {
        return Err(ValidationError::InvalidOptimizer(
            config.model.optimizer.clone(),
        ));
    }

    if config.model.learning_rate <= 0.0 || config.model.learning_rate > 1.0 {
        return Err(ValidationError::InvalidLearningRate(
            config.model.learning_rate,
        ));
    }

    if config.trainer.num_epochs == 0 {
        return Err(ValidationError::InvalidEpochs(config.trainer.num_epochs));
    }

    if config.trainer.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(config.trainer.batch_size));
    }

    if config.data.source == DataSource::Synthetic && config.data.num_samples == 0 {
        return Err(ValidationError::InvalidNumSamples(config.data.num_samples));
    }

    if config.data.num_workers == 0 {
        return Err(ValidationError::InvalidNumWorkers(config.data.num_workers));
    }

    if config.callbacks.keep_checkpoints == 0 {
        return Err(ValidationError::InvalidKeepCheckpoints(
            config.callbacks.keep_checkpoints,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ExperimentConfig {
        serde_json::from_str(
            r#"{
                "experiment": { "name": "valid" },
                "trainer": { "num_epochs": 2, "batch_size": 16 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = base_config();
        config.experiment.name = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyExperimentName)
        ));
    }

    #[test]
    fn test_wrong_input_shape_rejected() {
        let mut config = base_config();
        config.model.input_shape = [32, 32, 3];
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidInputShape([32, 32, 3]))
        ));
    }

    #[test]
    fn test_zero_classes_rejected() {
        let mut config = base_config();
        config.model.num_classes = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidNumClasses(0))
        ));
    }

    #[test]
    fn test_dropout_one_rejected() {
        let mut config = base_config();
        config.model.dropout = 1.0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidDropout(_))
        ));
    }

    #[test]
    fn test_unknown_optimizer_rejected() {
        let mut config = base_config();
        config.model.optimizer = "rmsprop".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidOptimizer(_))
        ));
    }

    #[test]
    fn test_optimizer_name_is_case_insensitive() {
        let mut config = base_config();
        config.model.optimizer = "Adam".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_epochs_rejected() {
        let mut config = base_config();
        config.trainer.num_epochs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidEpochs(0))
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = base_config();
        config.trainer.batch_size = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_zero_samples_only_rejected_for_synthetic() {
        let mut config = base_config();
        config.data.num_samples = 0;
        // Mnist source ignores the synthetic sample count
        assert!(validate_config(&config).is_ok());

        config.data.source = DataSource::Synthetic;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidNumSamples(0))
        ));
    }

    #[test]
    fn test_zero_keep_checkpoints_rejected() {
        let mut config = base_config();
        config.callbacks.keep_checkpoints = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidKeepCheckpoints(0))
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = base_config();
        config.data.num_workers = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidNumWorkers(0))
        ));
    }
}
