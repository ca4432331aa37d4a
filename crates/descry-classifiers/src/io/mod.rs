//! IO utilities for loading precomputed feature and label files.

pub mod feature_csv;

pub use feature_csv::{
    load_split, read_encoder_classes, read_feature_matrix, read_labels, SplitData, ENCODER_FILE,
    FEATURES_FILE, LABELS_FILE,
};
