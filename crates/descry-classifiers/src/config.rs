use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    /// Standardize feature columns (train statistics) before fitting.
    pub scale_features: bool,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model families and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    RandomForest {
        n_trees: u16,
        max_depth: Option<u16>,
        min_samples_split: usize,
        seed: u64,
    },
    Mlp {
        hidden_layers: Vec<usize>,
        max_epochs: usize,
        learning_rate: f64,
        batch_size: usize,
        seed: u64,
    },
}

impl ModelType {
    /// Short name used in log lines and output filenames.
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::RandomForest { .. } => "random-forest",
            ModelType::Mlp { .. } => "mlp",
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::RandomForest {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random-forest" | "random_forest" | "rf" => Ok(ModelType::default()),
            "mlp" => Ok(ModelType::Mlp {
                hidden_layers: vec![5000],
                max_epochs: 1000,
                learning_rate: 1e-3,
                batch_size: 200,
                seed: 1,
            }),
            _ => Err(format!(
                "Unknown model type: {}. Expected 'random-forest' or 'mlp'",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(scale_features: bool, model_type: ModelType) -> Self {
        Self {
            scale_features,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale_features: false,
            model_type: ModelType::default(),
        }
    }
}
