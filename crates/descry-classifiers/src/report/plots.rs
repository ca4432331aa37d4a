use plotly::common::{ColorScale, ColorScalePalette};
use plotly::layout::{Axis, BarMode, Layout};
use plotly::{Bar, HeatMap, Plot};

use crate::metrics::{accuracy, precision_recall_by_class, ConfusionMatrix};

/// Render a confusion matrix as a heatmap with class names on both axes and
/// the overall accuracy in the title.
pub fn plot_confusion_matrix(
    cm: &ConfusionMatrix,
    classes: &[String],
    title: &str,
) -> Result<Plot, String> {
    if classes.len() != cm.n_classes() {
        return Err(format!(
            "Confusion matrix has {} classes but {} class names were given",
            cm.n_classes(),
            classes.len()
        ));
    }

    let z: Vec<Vec<f64>> = cm
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(|v| v as f64).collect())
        .collect();

    let trace = HeatMap::new(classes.to_vec(), classes.to_vec(), z)
        .color_scale(ColorScale::Palette(ColorScalePalette::Greens));

    let acc = accuracy(cm) * 100.0;
    let layout = Layout::new()
        .title(format!("{} — Accuracy: {:.2}%", title, acc).as_str())
        .x_axis(Axis::new().title("Predicted label"))
        .y_axis(Axis::new().title("True label"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);

    Ok(plot)
}

/// Render per-class precision and recall as grouped bars.
pub fn plot_class_metrics(cm: &ConfusionMatrix, classes: &[String]) -> Result<Plot, String> {
    if classes.len() != cm.n_classes() {
        return Err(format!(
            "Confusion matrix has {} classes but {} class names were given",
            cm.n_classes(),
            classes.len()
        ));
    }

    let stats = precision_recall_by_class(cm);
    let precision: Vec<f64> = stats.iter().map(|s| s.precision as f64).collect();
    let recall: Vec<f64> = stats.iter().map(|s| s.recall as f64).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(classes.to_vec(), precision).name("Precision"));
    plot.add_trace(Bar::new(classes.to_vec(), recall).name("Recall"));
    plot.set_layout(
        Layout::new()
            .bar_mode(BarMode::Group)
            .title("Per-class precision and recall")
            .x_axis(Axis::new().title("Class"))
            .y_axis(Axis::new().title("Score")),
    );

    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_cm() -> ConfusionMatrix {
        ConfusionMatrix::from_predictions(&[0, 0, 1, 1], &[0, 1, 1, 1], 2).unwrap()
    }

    #[test]
    fn confusion_matrix_plot_builds() {
        let classes = vec!["cat".to_string(), "dog".to_string()];
        let plot = plot_confusion_matrix(&tiny_cm(), &classes, "orb").unwrap();
        let html = plot.to_inline_html(Some("confusion"));
        assert!(html.contains("confusion"));
    }

    #[test]
    fn class_name_count_must_match() {
        let classes = vec!["cat".to_string()];
        assert!(plot_confusion_matrix(&tiny_cm(), &classes, "orb").is_err());
        assert!(plot_class_metrics(&tiny_cm(), &classes).is_err());
    }
}
