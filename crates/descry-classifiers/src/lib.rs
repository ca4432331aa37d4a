//! descry-classifiers: train-and-evaluate helpers for image descriptor
//! classification.
//!
//! This crate provides CSV loading for precomputed feature matrices and
//! integer-encoded labels, a label encoder for decoding predictions back to
//! class names, model wrappers (random forest, MLP) behind a common trait,
//! classification metrics, and plotting/report helpers used by the CLI.
//!
//! The statistical estimators themselves are delegated to external crates
//! (`smartcore` for the forest, `candle` for the network); only the glue,
//! data handling and reporting live here.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod report;
