//! Fit-loop wrapper

use std::path::PathBuf;
use std::sync::Arc;

use burn::data::dataloader::{DataLoader, DataLoaderBuilder};
use burn::module::Module;
use burn::optim::{AdamConfig, Optimizer, SgdConfig};
use burn::record::CompactRecorder;
use burn::tensor::backend::AutodiffBackend;
use burn::train::checkpoint::{
    ComposedCheckpointingStrategy, KeepLastNCheckpoints, MetricCheckpointingStrategy,
};
use burn::train::logger::FileMetricLogger;
use burn::train::metric::store::{Aggregate, Direction, Split};
use burn::train::metric::{AccuracyMetric, LossMetric};
use burn::train::LearnerBuilder;

use crate::config::ExperimentConfig;
use crate::data::{DigitBatch, DigitBatcher, DigitData};
use crate::error::{Error, Result};
use crate::model::Model;
use crate::train::history::TrainingHistory;

/// One synchronous training session.
///
/// Owns the resolved output directories; everything else is read from
/// the configuration at `fit` time. Training runs to completion in a
/// single blocking call, with checkpoints and metric logs written as
/// side effects by the library's callbacks.
pub struct Trainer {
    config: ExperimentConfig,
    log_dir: PathBuf,
    checkpoint_dir: PathBuf,
}

impl Trainer {
    /// Create a trainer for the given experiment configuration.
    pub fn new(config: ExperimentConfig) -> Self {
        let log_dir = config.log_dir();
        let checkpoint_dir = config.checkpoint_dir();
        Self {
            config,
            log_dir,
            checkpoint_dir,
        }
    }

    /// Resolved metric-log directory.
    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }

    /// Resolved checkpoint directory.
    pub fn checkpoint_dir(&self) -> &PathBuf {
        &self.checkpoint_dir
    }

    /// Run the library fit loop to completion, persist the final
    /// weights, and return the per-epoch history kept in memory.
    pub fn fit<B: AutodiffBackend>(
        &self,
        model: Model<B>,
        data: DigitData,
        device: B::Device,
    ) -> Result<TrainingHistory> {
        let (train_split, test_split) = data.into_splits();

        let batcher_train = DigitBatcher::<B>::new(device.clone());
        let batcher_valid = DigitBatcher::<B::InnerBackend>::new(device.clone());

        let dataloader_train = DataLoaderBuilder::new(batcher_train)
            .batch_size(self.config.trainer.batch_size)
            .shuffle(self.config.experiment.seed)
            .num_workers(self.config.data.num_workers)
            .build(train_split);

        let dataloader_valid = DataLoaderBuilder::new(batcher_valid)
            .batch_size(self.config.trainer.batch_size)
            .shuffle(self.config.experiment.seed)
            .num_workers(self.config.data.num_workers)
            .build(test_split);

        let lr = self.config.model.learning_rate;

        let trained = match self.config.model.optimizer.to_lowercase().as_str() {
            "adam" => self.run_fit(
                model,
                AdamConfig::new().init::<B, Model<B>>(),
                lr,
                dataloader_train,
                dataloader_valid,
                &device,
            ),
            "sgd" => self.run_fit(
                model,
                SgdConfig::new().init::<B, Model<B>>(),
                lr,
                dataloader_train,
                dataloader_valid,
                &device,
            ),
            other => return Err(Error::Config(format!("unsupported optimizer: {other}"))),
        };

        trained
            .save_file(self.checkpoint_dir.join("model"), &CompactRecorder::new())
            .map_err(|e| Error::Checkpoint(format!("failed to save final model: {e}")))?;

        Ok(TrainingHistory::from_log_dir(&self.log_dir))
    }

    fn run_fit<B, O>(
        &self,
        model: Model<B>,
        optim: O,
        lr: f64,
        dataloader_train: Arc<dyn DataLoader<DigitBatch<B>>>,
        dataloader_valid: Arc<dyn DataLoader<DigitBatch<B::InnerBackend>>>,
        device: &B::Device,
    ) -> Model<B>
    where
        B: AutodiffBackend,
        O: Optimizer<Model<B>, B> + 'static,
        O::Record: 'static,
    {
        let artifact_dir = self.checkpoint_dir.to_string_lossy().into_owned();
        let train_log = self.log_dir.join("train").to_string_lossy().into_owned();
        let valid_log = self.log_dir.join("valid").to_string_lossy().into_owned();

        let mut builder = LearnerBuilder::new(&artifact_dir)
            .metric_train_numeric(AccuracyMetric::new())
            .metric_valid_numeric(AccuracyMetric::new())
            .metric_train_numeric(LossMetric::new())
            .metric_valid_numeric(LossMetric::new())
            .metric_loggers(
                FileMetricLogger::new(&train_log),
                FileMetricLogger::new(&valid_log),
            )
            .with_file_checkpointer(CompactRecorder::new());
        // Keep the best-validation-loss checkpoint plus the last N
        // epoch checkpoints
        builder.with_checkpointing_strategy(
            ComposedCheckpointingStrategy::builder()
                .add(KeepLastNCheckpoints::new(
                    self.config.callbacks.keep_checkpoints,
                ))
                .add(MetricCheckpointingStrategy::new::<LossMetric<B::InnerBackend>>(
                    Aggregate::Mean,
                    Direction::Lowest,
                    Split::Valid,
                ))
                .build(),
        );
        let learner = builder
            .devices(vec![device.clone()])
            .num_epochs(self.config.trainer.num_epochs)
            .build(model, optim, lr);

        learner.fit(dataloader_train, dataloader_valid)
    }
}
