use std::error::Error;
use std::fmt;

/// Custom error type for dataset construction and label decoding failures.
#[derive(Debug, PartialEq, Eq)]
pub enum DatasetError {
    /// Feature matrix has no rows or no columns.
    EmptyDataset,
    /// Feature row count and label count disagree.
    LengthMismatch { rows: usize, labels: usize },
    /// A CSV row had a different number of fields than the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// An integer label has no entry in the encoder classes.
    LabelOutOfRange { label: usize, n_classes: usize },
    /// A class name was not found in the encoder classes.
    UnknownClass(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::EmptyDataset => write!(f, "Dataset has no samples or no features"),
            DatasetError::LengthMismatch { rows, labels } => write!(
                f,
                "Feature matrix has {} rows but label vector has {} entries",
                rows, labels
            ),
            DatasetError::RaggedRow { row, expected, got } => write!(
                f,
                "Row {} has {} fields, expected {}",
                row, got, expected
            ),
            DatasetError::LabelOutOfRange { label, n_classes } => write!(
                f,
                "Label {} is out of range for {} encoder classes",
                label, n_classes
            ),
            DatasetError::UnknownClass(name) => {
                write!(f, "Class '{}' not found in encoder classes", name)
            }
        }
    }
}

impl Error for DatasetError {}
