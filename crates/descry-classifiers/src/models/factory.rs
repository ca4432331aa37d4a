use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Build a boxed classifier model from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(config: ModelConfig) -> Box<dyn ClassifierModel> {
    match config.model_type {
        ModelType::RandomForest { .. } => Box::new(
            crate::models::random_forest::RandomForestModel::new(config),
        ),
        ModelType::Mlp { .. } => Box::new(crate::models::mlp::MlpModel::new(config)),
    }
}
