use anyhow::Result;
use ndarray::{Array1, Array2};

/// A small trait abstraction over the classifier families exposed by this
/// crate. Implementations wrap an external estimator; the trait centralizes
/// the contract so model code can live next to its wrapper.
pub trait ClassifierModel {
    /// Fit the model on integer-encoded labels. The number of output classes
    /// is inferred from the labels (`max + 1`).
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<usize>) -> Result<()>;

    /// Predict integer-encoded labels for each row of `x`.
    fn predict(&self, x: &Array2<f32>) -> Result<Array1<usize>>;

    /// Human readable name for the model.
    fn name(&self) -> &str {
        "classifier"
    }
}
