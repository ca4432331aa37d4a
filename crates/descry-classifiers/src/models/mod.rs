pub mod classifier_trait;
pub mod factory;
pub mod mlp;
pub mod random_forest;
