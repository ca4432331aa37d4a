//! Minimal HTML report assembly.
//!
//! A `Report` is a titled list of sections, each holding pre-rendered HTML
//! blocks (typically inline plotly divs). Rendering produces a single file
//! that loads plotly.js from the CDN.
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

#[derive(Debug, Clone)]
pub struct ReportSection {
    heading: String,
    blocks: Vec<String>,
}

impl ReportSection {
    pub fn new<S: Into<String>>(heading: S) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    pub fn add_plot(mut self, plot: &Plot) -> Self {
        self.blocks.push(plot.to_inline_html(None));
        self
    }

    pub fn add_html<S: Into<String>>(mut self, block: S) -> Self {
        self.blocks.push(block.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(mut self, section: ReportSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn render(&self) -> String {
        let markup = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        "body { font-family: sans-serif; margin: 2em; } \
                         h1 { border-bottom: 1px solid #ccc; } \
                         section { margin-bottom: 2em; }"
                    }
                }
                body {
                    h1 { (self.title) }
                    @for sec in &self.sections {
                        section {
                            h2 { (sec.heading) }
                            @for block in &sec.blocks {
                                (PreEscaped(block.as_str()))
                            }
                        }
                    }
                }
            }
        };
        markup.into_string()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}

/// Output filename carrying the feature name, model name and local datetime,
/// e.g. `orb-random-forest-26082026-1412.html`.
pub fn timestamped_filename(feature_name: &str, model_name: &str) -> String {
    format!(
        "{}-{}-{}.html",
        feature_name,
        model_name,
        Local::now().format("%d%m%Y-%H%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_renders_sections() {
        let report = Report::new("Confusion Matrix: orb").add_section(
            ReportSection::new("Summary").add_html("<p>Accuracy: 92.00%</p>"),
        );
        let html = report.render();
        assert!(html.contains("Confusion Matrix: orb"));
        assert!(html.contains("Accuracy: 92.00%"));
        assert!(html.contains(PLOTLY_CDN));
    }

    #[test]
    fn filename_carries_feature_and_model() {
        let name = timestamped_filename("orb", "mlp");
        assert!(name.starts_with("orb-mlp-"));
        assert!(name.ends_with(".html"));
    }
}
