//! Batching of digit items into model-ready tensors

use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::vision::MnistItem;
use burn::tensor::backend::Backend;
use burn::tensor::{Data, ElementConversion, Int, Tensor};

// Normalization constants from the PyTorch MNIST example.
const MEAN: f32 = 0.1307;
const STD: f32 = 0.3081;

/// Maps raw dataset items to normalized image tensors in the 4-D
/// layout the model consumes: `[batch, channel, height, width]`.
#[derive(Clone)]
pub struct DigitBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> DigitBatcher<B> {
    /// Create a batcher placing tensors on `device`.
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// One batch of images and their labels.
///
/// The sample counts of `images` and `targets` always match.
#[derive(Clone, Debug)]
pub struct DigitBatch<B: Backend> {
    /// Normalized images, `[batch, 1, 28, 28]`
    pub images: Tensor<B, 4>,
    /// Class labels, `[batch]`
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> Batcher<MnistItem, DigitBatch<B>> for DigitBatcher<B> {
    fn batch(&self, items: Vec<MnistItem>) -> DigitBatch<B> {
        let images = items
            .iter()
            .map(|item| Data::<f32, 2>::from(item.image))
            .map(|data| Tensor::<B, 2>::from_data(data.convert(), &self.device))
            .map(|tensor| tensor.reshape([1, 1, 28, 28]))
            .map(|tensor| ((tensor / 255.0) - MEAN) / STD)
            .collect();

        let targets = items
            .iter()
            .map(|item| {
                Tensor::<B, 1, Int>::from_data(
                    Data::from([(item.label as i64).elem()]),
                    &self.device,
                )
            })
            .collect();

        let images = Tensor::cat(images, 0);
        let targets = Tensor::cat(targets, 0);

        DigitBatch { images, targets }
    }
}
