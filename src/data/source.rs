//! Train/test split construction

use burn::data::dataset::vision::{MnistDataset, MnistItem};
use burn::data::dataset::{Dataset, InMemDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{DataSource, ExperimentConfig};

/// One split of the digit dataset, consumable by burn's dataloader.
pub enum DigitDataset {
    /// Burn's built-in MNIST split
    Mnist(MnistDataset),
    /// Deterministic in-memory digits
    Synthetic(InMemDataset<MnistItem>),
}

impl Dataset<MnistItem> for DigitDataset {
    fn get(&self, index: usize) -> Option<MnistItem> {
        match self {
            Self::Mnist(dataset) => dataset.get(index),
            Self::Synthetic(dataset) => dataset.get(index),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Mnist(dataset) => dataset.len(),
            Self::Synthetic(dataset) => dataset.len(),
        }
    }
}

/// Both dataset splits, loaded once at startup and held in memory for
/// the duration of training.
pub struct DigitData {
    train: DigitDataset,
    test: DigitDataset,
}

impl DigitData {
    /// Load the source named by the configuration.
    ///
    /// The MNIST source downloads on first use (cached by burn after
    /// that); the synthetic source is generated from the experiment
    /// seed. Either way any load failure is fatal to the run.
    pub fn load(config: &ExperimentConfig) -> Self {
        match config.data.source {
            DataSource::Mnist => Self {
                train: DigitDataset::Mnist(MnistDataset::train()),
                test: DigitDataset::Mnist(MnistDataset::test()),
            },
            DataSource::Synthetic => Self {
                train: DigitDataset::Synthetic(synthetic_split(
                    config.data.num_samples,
                    config.experiment.seed,
                )),
                // Decorrelate the test split from the train split
                test: DigitDataset::Synthetic(synthetic_split(
                    config.data.num_samples,
                    config.experiment.seed.wrapping_add(1),
                )),
            },
        }
    }

    /// Training split accessor.
    pub fn train(&self) -> &DigitDataset {
        &self.train
    }

    /// Test split accessor.
    pub fn test(&self) -> &DigitDataset {
        &self.test
    }

    /// Consume into `(train, test)` for the dataloader builder.
    pub fn into_splits(self) -> (DigitDataset, DigitDataset) {
        (self.train, self.test)
    }
}

/// Deterministic 28x28 digit stand-ins: a label-dependent gradient
/// plus seeded noise, enough for the pipeline to see non-degenerate
/// inputs without touching the network.
fn synthetic_split(num_samples: usize, seed: u64) -> InMemDataset<MnistItem> {
    let mut rng = StdRng::seed_from_u64(seed);

    let items = (0..num_samples)
        .map(|i| {
            let label = (i % 10) as u8;
            let mut image = [[0.0f32; 28]; 28];
            for (y, row) in image.iter_mut().enumerate() {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let base = ((x + y + label as usize * 3) % 32) as f32 * 7.0;
                    *pixel = (base + rng.gen_range(0.0..32.0)).min(255.0);
                }
            }
            MnistItem { image, label }
        })
        .collect();

    InMemDataset::new(items)
}
