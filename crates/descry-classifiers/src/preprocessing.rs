//! Feature preprocessing helpers.
//!
//! Provides a per-column standard scaler fitted on the training split and
//! applied to both splits before fitting scale-sensitive models.

use ndarray::Array2;

/// Per-column mean/std standardizer.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl StandardScaler {
    /// Minimum stddev to avoid division by zero on constant columns.
    const MIN_STD: f32 = 1e-6;

    /// Fit a scaler from a matrix where rows are samples and columns are
    /// features. Panics on an empty matrix; callers validate shapes when
    /// constructing the `Dataset`.
    pub fn fit(x: &Array2<f32>) -> StandardScaler {
        let (n_rows, n_cols) = x.dim();
        assert!(n_rows > 0 && n_cols > 0, "fit requires a non-empty matrix");

        let n = n_rows as f32;
        let mut mean = vec![0.0f32; n_cols];
        for row in x.rows() {
            for (c, &v) in row.iter().enumerate() {
                mean[c] += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut std = vec![0.0f32; n_cols];
        for row in x.rows() {
            for (c, &v) in row.iter().enumerate() {
                let d = v - mean[c];
                std[c] += d * d;
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt().max(Self::MIN_STD);
        }

        StandardScaler { mean, std }
    }

    /// Standardize all rows, returning a new matrix.
    pub fn transform(&self, x: &Array2<f32>) -> Array2<f32> {
        let mut out = x.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (*v - self.mean[c]) / self.std[c];
            }
        }
        out
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}

/// Fit on `x` and transform it in one call.
pub fn fit_transform(x: &Array2<f32>) -> (StandardScaler, Array2<f32>) {
    let scaler = StandardScaler::fit(x);
    let transformed = scaler.transform(x);
    (scaler, transformed)
}
