use anyhow::{anyhow, bail, Result};
use ndarray::{Array1, Array2};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Random forest classifier delegating to `smartcore`.
pub struct RandomForestModel {
    model: Option<RandomForestClassifier<f32, u32, DenseMatrix<f32>, Vec<u32>>>,
    config: ModelConfig,
}

impl RandomForestModel {
    pub fn new(config: ModelConfig) -> Self {
        RandomForestModel {
            model: None,
            config,
        }
    }
}

fn to_dense_matrix(x: &Array2<f32>) -> DenseMatrix<f32> {
    let rows: Vec<Vec<f32>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

impl ClassifierModel for RandomForestModel {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<usize>) -> Result<()> {
        let ModelType::RandomForest {
            n_trees,
            max_depth,
            min_samples_split,
            seed,
        } = &self.config.model_type
        else {
            bail!(
                "Expected ModelType::RandomForest params, got {:?}",
                self.config.model_type
            );
        };

        let mut params = RandomForestClassifierParameters::default()
            .with_n_trees(*n_trees)
            .with_min_samples_split(*min_samples_split)
            .with_seed(*seed);
        if let Some(depth) = *max_depth {
            params = params.with_max_depth(depth);
        }

        let train_x = to_dense_matrix(x);
        let train_y: Vec<u32> = y.iter().map(|&v| v as u32).collect();

        let forest = RandomForestClassifier::fit(&train_x, &train_y, params)
            .map_err(|e| anyhow!("Random forest training failed: {}", e))?;
        self.model = Some(forest);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Array1<usize>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("Random forest model has not been fitted"))?;
        let test_x = to_dense_matrix(x);
        let predicted = model
            .predict(&test_x)
            .map_err(|e| anyhow!("Random forest prediction failed: {}", e))?;
        Ok(Array1::from_vec(
            predicted.into_iter().map(|v| v as usize).collect(),
        ))
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    #[test]
    fn random_forest_separates_two_classes() {
        // Two well-separated clusters along the first feature.
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                0.1, 0.2, 0.3, 0.1, 0.2, 0.4, 0.0, 0.3, 0.4, 0.0, 5.1, 5.2, 5.3, 5.1, 5.2, 5.4,
                5.0, 5.3, 5.4, 5.0,
            ],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);

        let config = ModelConfig {
            scale_features: false,
            model_type: ModelType::RandomForest {
                n_trees: 20,
                max_depth: Some(4),
                min_samples_split: 2,
                seed: 42,
            },
        };

        let mut model = RandomForestModel::new(config);
        model.fit(&x, &y).unwrap();
        let predicted = model.predict(&x).unwrap();

        assert_eq!(predicted.len(), y.len());
        let correct = predicted
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        assert!(correct >= 9, "expected near-perfect fit, got {}/10", correct);
    }

    #[test]
    fn predict_before_fit_errors() {
        let model = RandomForestModel::new(ModelConfig::default());
        let x = Array2::from_shape_vec((1, 2), vec![0.0, 1.0]).unwrap();
        assert!(model.predict(&x).is_err());
    }
}
