//! Integration tests for the CSV readers and split loading.

use std::fs;
use std::path::PathBuf;

use descry_classifiers::io::{
    load_split, read_encoder_classes, read_feature_matrix, read_labels, ENCODER_FILE,
    FEATURES_FILE, LABELS_FILE,
};

/// Fresh scratch directory per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("descry_{}_{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn reads_feature_matrix() {
    let dir = scratch_dir("features");
    let path = dir.join(FEATURES_FILE);
    fs::write(&path, "1.0,2.0,3.0\n4.5,5.5,6.5\n").unwrap();

    let x = read_feature_matrix(&path).unwrap();
    assert_eq!(x.dim(), (2, 3));
    assert!((x[(1, 2)] - 6.5).abs() < 1e-6);
}

#[test]
fn ragged_row_is_an_error() {
    let dir = scratch_dir("ragged");
    let path = dir.join(FEATURES_FILE);
    fs::write(&path, "1.0,2.0\n3.0\n").unwrap();

    let err = read_feature_matrix(&path).unwrap_err();
    assert!(err.to_string().contains("Row 2"), "got: {}", err);
}

#[test]
fn non_numeric_feature_is_an_error() {
    let dir = scratch_dir("nonnum");
    let path = dir.join(FEATURES_FILE);
    fs::write(&path, "1.0,abc\n").unwrap();
    assert!(read_feature_matrix(&path).is_err());
}

#[test]
fn reads_labels_one_per_line() {
    let dir = scratch_dir("labels");
    let path = dir.join(LABELS_FILE);
    fs::write(&path, "0\n1\n2\n1\n").unwrap();

    let y = read_labels(&path).unwrap();
    assert_eq!(y.to_vec(), vec![0, 1, 2, 1]);
}

#[test]
fn reads_labels_flattened_across_fields() {
    // np.loadtxt flattens a line holding several comma-separated values.
    let dir = scratch_dir("labels_flat");
    let path = dir.join(LABELS_FILE);
    fs::write(&path, "0,1\n2\n").unwrap();

    let y = read_labels(&path).unwrap();
    assert_eq!(y.to_vec(), vec![0, 1, 2]);
}

#[test]
fn reads_encoder_classes() {
    let dir = scratch_dir("encoder");
    let path = dir.join(ENCODER_FILE);
    fs::write(&path, "bike\ncar\nperson\n").unwrap();

    let encoder = read_encoder_classes(&path).unwrap();
    assert_eq!(encoder.classes().to_vec(), vec!["bike", "car", "person"]);
}

#[test]
fn load_split_pairs_features_and_labels() {
    let dir = scratch_dir("split");
    fs::write(dir.join(FEATURES_FILE), "1.0,0.0\n0.0,1.0\n1.0,1.0\n").unwrap();
    fs::write(dir.join(LABELS_FILE), "0\n1\n1\n").unwrap();
    fs::write(dir.join(ENCODER_FILE), "cat\ndog\n").unwrap();

    let split = load_split(&dir).unwrap();
    assert_eq!(split.dataset.n_samples(), 3);
    assert_eq!(split.dataset.n_features(), 2);
    let encoder = split.encoder.expect("encoder classes should be loaded");
    assert_eq!(encoder.len(), 2);
}

#[test]
fn load_split_without_encoder() {
    let dir = scratch_dir("split_noenc");
    fs::write(dir.join(FEATURES_FILE), "1.0\n2.0\n").unwrap();
    fs::write(dir.join(LABELS_FILE), "0\n1\n").unwrap();

    let split = load_split(&dir).unwrap();
    assert!(split.encoder.is_none());
}

#[test]
fn load_split_label_count_mismatch() {
    let dir = scratch_dir("split_mismatch");
    fs::write(dir.join(FEATURES_FILE), "1.0\n2.0\n3.0\n").unwrap();
    fs::write(dir.join(LABELS_FILE), "0\n1\n").unwrap();

    assert!(load_split(&dir).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = scratch_dir("missing");
    assert!(read_feature_matrix(dir.join(FEATURES_FILE)).is_err());
}
