//! End-to-end evaluation run: train on the train split, predict on the test
//! split, compute metrics and write the HTML report.
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use descry_classifiers::config::ModelConfig;
use descry_classifiers::io::load_split;
use descry_classifiers::metrics::{accuracy, precision_recall_by_class, ConfusionMatrix};
use descry_classifiers::models::factory::build_model;
use descry_classifiers::preprocessing::StandardScaler;
use descry_classifiers::report::plots::{plot_class_metrics, plot_confusion_matrix};
use descry_classifiers::report::{timestamped_filename, Report, ReportSection};

/// Parameters for a full train/test evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateConfig {
    pub model: ModelConfig,
    /// Feature family name; selects the `<data_dir>/<feature_name>/` subtree.
    pub feature_name: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub write_report: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            feature_name: "orb".to_string(),
            data_dir: PathBuf::from("./features_labels"),
            output_dir: PathBuf::from("./results"),
            write_report: true,
        }
    }
}

/// Load an evaluation configuration from a JSON file.
pub fn load_evaluate_config<P: AsRef<Path>>(path: P) -> Result<EvaluateConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: EvaluateConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Outputs from an evaluation run.
#[derive(Debug)]
pub struct EvaluateResult {
    pub accuracy: f32,
    pub confusion: ConfusionMatrix,
    pub classes: Vec<String>,
    pub model_name: String,
}

/// Run both phases: fit on the train split, evaluate on the test split.
pub fn run_evaluate(config: &EvaluateConfig) -> Result<EvaluateResult> {
    let run_start = Instant::now();
    let feature_dir = config.data_dir.join(&config.feature_name);

    log::info!("========= TRAINING PHASE =========");
    let train = load_split(feature_dir.join("train"))?;
    train.dataset.log_summary("train");

    let scaler = config
        .model
        .scale_features
        .then(|| StandardScaler::fit(&train.dataset.x));
    let train_x = match &scaler {
        Some(scaler) => scaler.transform(&train.dataset.x),
        None => train.dataset.x.clone(),
    };

    let mut model = build_model(config.model.clone());
    log::info!("Training the {} model...", model.name());
    let fit_start = Instant::now();
    model.fit(&train_x, &train.dataset.y)?;
    log::info!("Training done in {:.2}s", fit_start.elapsed().as_secs_f64());

    log::info!("=========== TEST PHASE ===========");
    let test = load_split(feature_dir.join("test"))?;
    test.dataset.log_summary("test");
    let encoder = test.encoder.ok_or_else(|| {
        anyhow!(
            "Missing {} in {}",
            descry_classifiers::io::ENCODER_FILE,
            feature_dir.join("test").display()
        )
    })?;
    encoder.check_labels(&test.dataset.y)?;

    let test_x = match &scaler {
        Some(scaler) => scaler.transform(&test.dataset.x),
        None => test.dataset.x.clone(),
    };

    log::info!("Predicting...");
    let predict_start = Instant::now();
    let predicted = model.predict(&test_x)?;
    log::info!(
        "Predicting done in {:.2}s",
        predict_start.elapsed().as_secs_f64()
    );

    let confusion = ConfusionMatrix::from_predictions(
        &test.dataset.y.to_vec(),
        &predicted.to_vec(),
        encoder.len(),
    )?;
    let acc = accuracy(&confusion);

    log::info!("Total execution time: {:.2}s", run_start.elapsed().as_secs_f64());
    log::info!("Accuracy: {:.2}%", acc * 100.0);

    Ok(EvaluateResult {
        accuracy: acc,
        confusion,
        classes: encoder.classes().to_vec(),
        model_name: model.name().to_string(),
    })
}

/// Write the confusion-matrix report; returns the path of the written file.
pub fn write_evaluation_report(
    result: &EvaluateResult,
    config: &EvaluateConfig,
) -> Result<PathBuf> {
    log::info!("Plotting confusion matrix and accuracy...");

    let title = format!("Confusion Matrix: {}", config.feature_name);
    let confusion_plot = plot_confusion_matrix(&result.confusion, &result.classes, &title)
        .map_err(anyhow::Error::msg)?;
    let metrics_plot =
        plot_class_metrics(&result.confusion, &result.classes).map_err(anyhow::Error::msg)?;

    let stats = precision_recall_by_class(&result.confusion);
    let mut rows = String::new();
    for (name, s) in result.classes.iter().zip(stats.iter()) {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{}</td></tr>",
            name, s.precision, s.recall, s.f1, s.support
        ));
    }
    let summary = format!(
        "<p><b>Model:</b> {} &mdash; <b>Accuracy:</b> {:.2}%</p>\
         <table border=\"1\" cellpadding=\"4\">\
         <tr><th>Class</th><th>Precision</th><th>Recall</th><th>F1</th><th>Support</th></tr>\
         {}</table>",
        result.model_name,
        result.accuracy * 100.0,
        rows
    );

    let report = Report::new(format!(
        "{} — {} evaluation",
        config.feature_name, result.model_name
    ))
    .add_section(ReportSection::new("Summary").add_html(summary))
    .add_section(ReportSection::new("Confusion matrix").add_plot(&confusion_plot))
    .add_section(ReportSection::new("Per-class metrics").add_plot(&metrics_plot));

    let path = config
        .output_dir
        .join(timestamped_filename(&config.feature_name, &result.model_name));
    report.save(&path)?;
    log::info!("Report written to {}", path.display());
    Ok(path)
}
