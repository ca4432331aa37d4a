//! Data structures for feature/label datasets and label encoding.
//!
//! `Dataset` pairs a feature matrix with integer-encoded labels and validates
//! the pairing at construction. `LabelEncoder` holds the ordered class names
//! used to decode integer labels back to human-readable names, matching the
//! encoder files written by the feature-extraction step.
use ndarray::{Array1, Array2};

use crate::error::DatasetError;

/// A feature matrix with one integer-encoded label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<usize>,
}

impl Dataset {
    /// Build a dataset, validating that the matrix is non-empty and that the
    /// label vector is row-aligned with it.
    pub fn new(x: Array2<f32>, y: Array1<usize>) -> Result<Self, DatasetError> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(DatasetError::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(DatasetError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of distinct classes implied by the labels (max label + 1).
    pub fn n_classes(&self) -> usize {
        self.y.iter().max().map_or(0, |&m| m + 1)
    }

    pub fn log_summary(&self, split: &str) {
        log::info!(
            "{} split: {} samples, {} feature columns, {} classes",
            split,
            self.n_samples(),
            self.n_features(),
            self.n_classes()
        );
    }
}

/// Ordered class names; index position = integer label value.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn from_classes(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Decode integer labels back to class names.
    pub fn inverse_transform(&self, labels: &[usize]) -> Result<Vec<String>, DatasetError> {
        labels
            .iter()
            .map(|&label| {
                self.classes
                    .get(label)
                    .cloned()
                    .ok_or(DatasetError::LabelOutOfRange {
                        label,
                        n_classes: self.classes.len(),
                    })
            })
            .collect()
    }

    /// Encode class names to integer labels.
    pub fn transform(&self, names: &[String]) -> Result<Vec<usize>, DatasetError> {
        names
            .iter()
            .map(|name| {
                self.classes
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| DatasetError::UnknownClass(name.clone()))
            })
            .collect()
    }

    /// Error if any label has no corresponding encoder class.
    pub fn check_labels(&self, labels: &Array1<usize>) -> Result<(), DatasetError> {
        for &label in labels.iter() {
            if label >= self.classes.len() {
                return Err(DatasetError::LabelOutOfRange {
                    label,
                    n_classes: self.classes.len(),
                });
            }
        }
        Ok(())
    }
}
