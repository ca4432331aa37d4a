//! Evaluation metrics for multi-class classification.

use crate::error::DatasetError;

/// Confusion matrix for a `K`-class classifier.
///
/// Counts are row-major with rows indexing the true class and columns the
/// predicted class.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    n_classes: usize,
    counts: Vec<u64>,
}

impl ConfusionMatrix {
    /// Create an empty `KxK` confusion matrix.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    /// Tally paired true/predicted labels.
    pub fn from_predictions(
        truth: &[usize],
        predicted: &[usize],
        n_classes: usize,
    ) -> Result<Self, DatasetError> {
        if truth.len() != predicted.len() {
            return Err(DatasetError::LengthMismatch {
                rows: truth.len(),
                labels: predicted.len(),
            });
        }
        let mut cm = Self::new(n_classes);
        for (&t, &p) in truth.iter().zip(predicted.iter()) {
            cm.add(t, p)?;
        }
        Ok(cm)
    }

    pub fn add(&mut self, truth: usize, predicted: usize) -> Result<(), DatasetError> {
        let out_of_range = truth.max(predicted);
        if out_of_range >= self.n_classes {
            return Err(DatasetError::LabelOutOfRange {
                label: out_of_range,
                n_classes: self.n_classes,
            });
        }
        self.counts[truth * self.n_classes + predicted] += 1;
        Ok(())
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u64 {
        self.counts[truth * self.n_classes + predicted]
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts as nested rows (true class major), for plotting.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.n_classes)
            .map(|t| (0..self.n_classes).map(|p| self.get(t, p)).collect())
            .collect()
    }
}

/// Precision/recall statistics for a single class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Number of true examples for the class.
    pub support: u64,
}

/// Overall accuracy (trace over total) in `[0, 1]`.
pub fn accuracy(cm: &ConfusionMatrix) -> f32 {
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    let correct: u64 = (0..cm.n_classes()).map(|k| cm.get(k, k)).sum();
    correct as f32 / total as f32
}

/// Per-class precision, recall, F1 and support from a confusion matrix.
///
/// Precision divides the diagonal count by its column total (everything
/// predicted as the class), recall by its row total (everything truly of
/// the class).
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> Vec<ClassStats> {
    let k = cm.n_classes();
    (0..k)
        .map(|class_idx| {
            let tp = cm.get(class_idx, class_idx) as f32;
            let support: u64 = (0..k).map(|p| cm.get(class_idx, p)).sum();
            let predicted: u64 = (0..k).map(|t| cm.get(t, class_idx)).sum();

            let precision = if predicted == 0 {
                0.0
            } else {
                tp / predicted as f32
            };
            let recall = if support == 0 {
                0.0
            } else {
                tp / support as f32
            };
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };

            ClassStats {
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect()
}
