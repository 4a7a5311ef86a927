//! Dataset loading and batching
//!
//! Both splits are loaded eagerly at startup; batching and shuffling
//! are delegated to burn's dataloader. The batcher maps raw dataset
//! items to normalized 4-D image tensors in the layout the model
//! expects.

mod batcher;
mod source;

pub use batcher::{DigitBatch, DigitBatcher};
pub use source::{DigitData, DigitDataset};
