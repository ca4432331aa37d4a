//! Reporting and plotting helpers.
//!
//! This module wraps plotting helpers (Plotly) and a small HTML report
//! builder used by the CLI. Plots are small helper functions converting
//! metric data into `plotly::Plot`.
pub mod plots;
pub mod report;

pub use report::{timestamped_filename, Report, ReportSection};
