//! Readers for the headerless CSV files produced by the feature-extraction
//! step: a float feature matrix, integer labels, and encoder class names.
//!
//! Each split directory holds `features.csv` and `labels.csv`; the test
//! split additionally holds `encoderClasses.csv` with one class name per
//! integer label.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ndarray::{Array1, Array2};

use crate::data_handling::{Dataset, LabelEncoder};
use crate::error::DatasetError;

pub const FEATURES_FILE: &str = "features.csv";
pub const LABELS_FILE: &str = "labels.csv";
pub const ENCODER_FILE: &str = "encoderClasses.csv";

/// One split directory loaded into memory.
#[derive(Debug, Clone)]
pub struct SplitData {
    pub dataset: Dataset,
    /// Present when the split directory contains an encoder classes file.
    pub encoder: Option<LabelEncoder>,
}

fn reader_for<P: AsRef<Path>>(path: P) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))
}

/// Read a headerless comma-delimited float matrix. Every row must have the
/// same number of fields as the first row.
pub fn read_feature_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f32>> {
    let mut reader = reader_for(&path)?;

    let mut values = Vec::new();
    let mut n_cols = 0usize;
    let mut n_rows = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.len() == 1 && record.get(0).unwrap_or_default().is_empty() {
            // np.loadtxt skips blank lines; do the same.
            continue;
        }
        if n_rows == 0 {
            n_cols = record.len();
        } else if record.len() != n_cols {
            return Err(DatasetError::RaggedRow {
                row: row_idx + 1,
                expected: n_cols,
                got: record.len(),
            }
            .into());
        }
        for field in record.iter() {
            let parsed = field
                .parse::<f32>()
                .with_context(|| format!("Invalid feature value '{}' at row {}", field, row_idx + 1))?;
            values.push(parsed);
        }
        n_rows += 1;
    }

    if n_rows == 0 || n_cols == 0 {
        return Err(anyhow!(
            "Feature file {} contains no data",
            path.as_ref().display()
        ));
    }

    Array2::from_shape_vec((n_rows, n_cols), values).context("Failed to build feature matrix")
}

/// Read integer labels, one per line. Extra comma-separated fields on a line
/// are flattened, matching `np.loadtxt` on a 1-D file.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Array1<usize>> {
    let mut reader = reader_for(&path)?;

    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        for field in record.iter() {
            if field.is_empty() {
                continue;
            }
            let parsed = field
                .parse::<usize>()
                .with_context(|| format!("Invalid label '{}' at row {}", field, row_idx + 1))?;
            labels.push(parsed);
        }
    }

    if labels.is_empty() {
        return Err(anyhow!(
            "Label file {} contains no data",
            path.as_ref().display()
        ));
    }

    Ok(Array1::from_vec(labels))
}

/// Read class names, one per line (or comma separated), whitespace-trimmed.
pub fn read_encoder_classes<P: AsRef<Path>>(path: P) -> Result<LabelEncoder> {
    let mut reader = reader_for(&path)?;

    let mut classes = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        for field in record.iter() {
            if !field.is_empty() {
                classes.push(field.to_string());
            }
        }
    }

    if classes.is_empty() {
        return Err(anyhow!(
            "Encoder classes file {} contains no data",
            path.as_ref().display()
        ));
    }

    Ok(LabelEncoder::from_classes(classes))
}

/// Load one split directory (`features.csv` + `labels.csv`, plus
/// `encoderClasses.csv` when present).
pub fn load_split<P: AsRef<Path>>(dir: P) -> Result<SplitData> {
    let dir = dir.as_ref();

    let x = read_feature_matrix(dir.join(FEATURES_FILE))?;
    let y = read_labels(dir.join(LABELS_FILE))?;
    let dataset = Dataset::new(x, y)
        .with_context(|| format!("Inconsistent split directory: {}", dir.display()))?;

    let encoder_path = dir.join(ENCODER_FILE);
    let encoder = if encoder_path.exists() {
        Some(read_encoder_classes(encoder_path)?)
    } else {
        None
    };

    Ok(SplitData { dataset, encoder })
}
