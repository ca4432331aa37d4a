//! Integration tests for the model factory and both classifier families.

use descry_classifiers::config::{ModelConfig, ModelType};
use descry_classifiers::models::factory;
use ndarray::{Array1, Array2};

/// Two clusters separated along the first feature.
fn two_cluster_data() -> (Array2<f32>, Array1<usize>) {
    let x = Array2::from_shape_vec(
        (12, 2),
        vec![
            0.1, 0.9, 0.2, 1.1, 0.0, 0.8, 0.3, 1.0, 0.1, 1.2, 0.2, 0.7, //
            4.1, -0.9, 4.2, -1.1, 4.0, -0.8, 4.3, -1.0, 4.1, -1.2, 4.2, -0.7,
        ],
    )
    .expect("failed to create feature matrix");
    let y = Array1::from_vec(vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
    (x, y)
}

fn count_correct(predicted: &Array1<usize>, truth: &Array1<usize>) -> usize {
    predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count()
}

#[test]
fn factory_builds_random_forest() {
    let (x, y) = two_cluster_data();
    let config = ModelConfig {
        scale_features: false,
        model_type: ModelType::RandomForest {
            n_trees: 20,
            max_depth: Some(4),
            min_samples_split: 2,
            seed: 42,
        },
    };

    let mut model = factory::build_model(config);
    assert_eq!(model.name(), "random-forest");
    model.fit(&x, &y).expect("fit failed");
    let predicted = model.predict(&x).expect("predict failed");
    assert_eq!(predicted.len(), x.nrows());
    assert!(count_correct(&predicted, &y) >= 11);
}

#[test]
fn factory_builds_mlp() {
    let (x, y) = two_cluster_data();
    let config = ModelConfig {
        scale_features: false,
        model_type: ModelType::Mlp {
            hidden_layers: vec![8],
            max_epochs: 200,
            learning_rate: 0.05,
            batch_size: 12,
            seed: 7,
        },
    };

    let mut model = factory::build_model(config);
    assert_eq!(model.name(), "mlp");
    model.fit(&x, &y).expect("fit failed");
    let predicted = model.predict(&x).expect("predict failed");
    assert_eq!(predicted.len(), x.nrows());
    assert!(
        count_correct(&predicted, &y) >= 11,
        "MLP failed to separate two well-separated clusters"
    );
}

#[test]
fn mlp_rejects_single_class_labels() {
    let x = Array2::from_shape_vec((3, 2), vec![0.0; 6]).unwrap();
    let y = Array1::from_vec(vec![0, 0, 0]);
    let config = ModelConfig {
        scale_features: false,
        model_type: ModelType::Mlp {
            hidden_layers: vec![4],
            max_epochs: 10,
            learning_rate: 0.01,
            batch_size: 3,
            seed: 1,
        },
    };
    let mut model = factory::build_model(config);
    assert!(model.fit(&x, &y).is_err());
}
