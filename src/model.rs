//! Fixed-topology convolutional classifier
//!
//! conv(1→32, 3×3) → relu → conv(32→64, 3×3) → relu → max-pool 2×2 →
//! dropout → flatten → dense(hidden) → relu → dropout →
//! dense(num_classes). Only the class count, the dense width, and the
//! dropout probability come from the configuration; the topology is
//! not configurable.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::loss::CrossEntropyLossConfig;
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig, Relu};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{Int, Tensor};
use burn::train::{ClassificationOutput, TrainOutput, TrainStep, ValidStep};

use crate::config::ExperimentConfig;
use crate::data::DigitBatch;

// 28x28 input through two valid 3x3 convs and one 2x2 pool: 64 channels
// of 12x12 feature maps.
const FLATTENED: usize = 64 * 12 * 12;

/// The convolutional digit classifier.
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool: MaxPool2d,
    dropout: Dropout,
    linear1: Linear<B>,
    linear2: Linear<B>,
    activation: Relu,
}

/// Hyperparameters of the fixed topology.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub num_classes: usize,
    pub hidden_size: usize,
    pub dropout: f64,
}

impl ModelConfig {
    /// Hyperparameters from the `model` section of the experiment
    /// configuration.
    pub fn from_experiment(config: &ExperimentConfig) -> Self {
        Self {
            num_classes: config.model.num_classes,
            hidden_size: config.model.hidden_size,
            dropout: config.model.dropout,
        }
    }

    /// Build the module on the given device.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        Model {
            conv1: Conv2dConfig::new([1, 32], [3, 3]).init(device),
            conv2: Conv2dConfig::new([32, 64], [3, 3]).init(device),
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            dropout: DropoutConfig::new(self.dropout).init(),
            linear1: LinearConfig::new(FLATTENED, self.hidden_size).init(device),
            linear2: LinearConfig::new(self.hidden_size, self.num_classes).init(device),
            activation: Relu::new(),
        }
    }
}

impl<B: Backend> Model<B> {
    /// Maps `[batch, 1, 28, 28]` images to `[batch, num_classes]`
    /// logits.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch_size, _, _, _] = images.dims();

        let x = self.activation.forward(self.conv1.forward(images));
        let x = self.activation.forward(self.conv2.forward(x));
        let x = self.pool.forward(x);
        let x = self.dropout.forward(x);

        let x = x.reshape([batch_size, FLATTENED]);
        let x = self.activation.forward(self.linear1.forward(x));
        let x = self.dropout.forward(x);

        self.linear2.forward(x)
    }

    /// Forward pass plus the cross-entropy loss the training loop
    /// monitors.
    pub fn forward_classification(
        &self,
        images: Tensor<B, 4>,
        targets: Tensor<B, 1, Int>,
    ) -> ClassificationOutput<B> {
        let output = self.forward(images);
        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput::new(loss, output, targets)
    }
}

impl<B: AutodiffBackend> TrainStep<DigitBatch<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, batch: DigitBatch<B>) -> TrainOutput<ClassificationOutput<B>> {
        let item = self.forward_classification(batch.images, batch.targets);

        TrainOutput::new(self, item.loss.backward(), item)
    }
}

impl<B: Backend> ValidStep<DigitBatch<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, batch: DigitBatch<B>) -> ClassificationOutput<B> {
        self.forward_classification(batch.images, batch.targets)
    }
}
