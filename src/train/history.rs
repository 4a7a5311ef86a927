//! In-memory record of per-epoch metrics
//!
//! The learner's file metric logger writes one `<value>,<epoch>` line
//! per step under `<log dir>/train/epoch-<n>/<Metric>.log`. After the
//! run this reads those files back into per-epoch means. The record
//! lives only for the lifetime of the process; nothing here persists
//! it again.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-epoch mean of every metric logged during training, in epoch
/// order.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    epochs: Vec<EpochRecord>,
}

/// Metric means for a single epoch, keyed by metric name.
#[derive(Debug, Clone)]
pub struct EpochRecord {
    pub epoch: usize,
    pub metrics: BTreeMap<String, f64>,
}

impl TrainingHistory {
    /// Collect the training-split metrics written under `log_dir`.
    ///
    /// Unreadable or unparseable entries are skipped; an empty history
    /// is not an error.
    pub fn from_log_dir(log_dir: &Path) -> Self {
        Self::from_split_dir(&log_dir.join("train"))
    }

    fn from_split_dir(dir: &Path) -> Self {
        let Ok(entries) = fs::read_dir(dir) else {
            return Self::default();
        };

        let mut epochs = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(epoch) = name
                .strip_prefix("epoch-")
                .and_then(|n| n.parse::<usize>().ok())
            else {
                continue;
            };

            let mut metrics = BTreeMap::new();
            if let Ok(files) = fs::read_dir(entry.path()) {
                for file in files.flatten() {
                    let path = file.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("log") {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    if let Some(mean) = mean_of_log(&path) {
                        metrics.insert(stem.to_string(), mean);
                    }
                }
            }
            epochs.push(EpochRecord { epoch, metrics });
        }

        epochs.sort_by_key(|record| record.epoch);
        Self { epochs }
    }

    /// Number of epochs with recorded metrics.
    pub fn num_epochs(&self) -> usize {
        self.epochs.len()
    }

    /// True when no metrics were found at all.
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// All epoch records in ascending epoch order.
    pub fn epochs(&self) -> &[EpochRecord] {
        &self.epochs
    }

    /// Curve of one metric across epochs, e.g. "Loss" or "Accuracy".
    /// Epochs missing the metric are skipped.
    pub fn curve(&self, metric: &str) -> Vec<f64> {
        self.epochs
            .iter()
            .filter_map(|record| record.metrics.get(metric).copied())
            .collect()
    }

    /// Value of a metric at the last recorded epoch.
    pub fn final_metric(&self, metric: &str) -> Option<f64> {
        self.epochs
            .last()
            .and_then(|record| record.metrics.get(metric).copied())
    }
}

// Each line is `<value>,<epoch>`; only the value field matters here.
fn mean_of_log(path: &Path) -> Option<f64> {
    let content = fs::read_to_string(path).ok()?;
    let values: Vec<f64> = content
        .lines()
        .filter_map(|line| line.split(',').next())
        .filter_map(|field| field.trim().parse().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Mirrors the logger's on-disk format: one `<value>,<epoch>` line
    // per step.
    fn write_epoch(root: &Path, epoch: usize, metric: &str, values: &[f64]) {
        let dir = root.join("train").join(format!("epoch-{epoch}"));
        fs::create_dir_all(&dir).unwrap();
        let lines: Vec<String> = values.iter().map(|v| format!("{v},{epoch}")).collect();
        fs::write(dir.join(format!("{metric}.log")), lines.join("\n")).unwrap();
    }

    #[test]
    fn test_empty_log_dir_yields_empty_history() {
        let temp = TempDir::new().unwrap();
        let history = TrainingHistory::from_log_dir(temp.path());
        assert!(history.is_empty());
        assert_eq!(history.num_epochs(), 0);
        assert!(history.final_metric("Loss").is_none());
    }

    #[test]
    fn test_per_epoch_means() {
        let temp = TempDir::new().unwrap();
        write_epoch(temp.path(), 1, "Loss", &[2.0, 1.0]);
        write_epoch(temp.path(), 2, "Loss", &[0.5, 0.5]);

        let history = TrainingHistory::from_log_dir(temp.path());
        assert_eq!(history.num_epochs(), 2);
        assert_eq!(history.curve("Loss"), vec![1.5, 0.5]);
        assert_eq!(history.final_metric("Loss"), Some(0.5));
    }

    #[test]
    fn test_epochs_sorted_numerically() {
        let temp = TempDir::new().unwrap();
        write_epoch(temp.path(), 10, "Loss", &[0.1]);
        write_epoch(temp.path(), 2, "Loss", &[0.2]);

        let history = TrainingHistory::from_log_dir(temp.path());
        let order: Vec<usize> = history.epochs().iter().map(|r| r.epoch).collect();
        assert_eq!(order, vec![2, 10]);
    }

    #[test]
    fn test_multiple_metrics_per_epoch() {
        let temp = TempDir::new().unwrap();
        write_epoch(temp.path(), 1, "Loss", &[1.0]);
        write_epoch(temp.path(), 1, "Accuracy", &[90.0, 92.0]);

        let history = TrainingHistory::from_log_dir(temp.path());
        assert_eq!(history.num_epochs(), 1);
        assert_eq!(history.final_metric("Accuracy"), Some(91.0));
        assert_eq!(history.final_metric("Loss"), Some(1.0));
    }

    #[test]
    fn test_value_read_from_first_csv_field() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("train/epoch-1");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Loss.log"), "2.5,1\n1.5,1\n").unwrap();

        let history = TrainingHistory::from_log_dir(temp.path());
        assert_eq!(history.final_metric("Loss"), Some(2.0));
    }

    #[test]
    fn test_garbage_lines_are_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("train/epoch-1");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Loss.log"), "1.0,1\nnot-a-number\n3.0,1").unwrap();

        let history = TrainingHistory::from_log_dir(temp.path());
        assert_eq!(history.final_metric("Loss"), Some(2.0));
    }

    #[test]
    fn test_non_log_files_ignored() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("train/epoch-1");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("notes.txt"), "5.0").unwrap();

        let history = TrainingHistory::from_log_dir(temp.path());
        assert_eq!(history.num_epochs(), 1);
        assert!(history.final_metric("notes").is_none());
    }
}
