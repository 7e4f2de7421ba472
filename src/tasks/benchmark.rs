use std::fs;
use std::io::{Error, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::classifiers::Classifier;
use crate::core::{Dataset, ModelError};
use crate::evaluation::{CrossValidator, Evaluation};

/// Output format of the rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Latex,
    Csv,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Latex => "tex",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// One classifier row of the benchmark grid, in dataset order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub classifier: String,
    pub evaluations: Vec<Evaluation>,
}

/// Classifier × dataset grid of cross-validation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub datasets: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl BenchmarkReport {
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Latex => self.to_latex(),
            ReportFormat::Csv => self.to_csv(),
            ReportFormat::Json => self.to_json(),
        }
    }

    pub fn to_latex(&self) -> String {
        let mut out = String::from("\\begin{table}\n\\begin{tabular}{c|");
        out.push_str(&"c|".repeat(self.datasets.len()));
        out.push_str("}\n");
        for name in &self.datasets {
            out.push_str(&format!(" & {name}"));
        }
        out.push_str("\\\\\n\\hline\n");

        for row in &self.rows {
            out.push_str(&row.classifier);
            for evaluation in &row.evaluations {
                out.push_str(&format!(
                    " & ${:.2}\\% \\pm {:.2}$",
                    evaluation.mean * 100.0,
                    evaluation.half_width * 100.0
                ));
            }
            out.push_str("\\\\\n\\hline\n");
        }

        out.push_str("\\end{tabular}\n\\end{table}\n");
        out
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("classifier");
        for name in &self.datasets {
            out.push(',');
            out.push_str(name);
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&row.classifier);
            for evaluation in &row.evaluations {
                out.push_str(&format!(
                    ",{:.6}±{:.6}",
                    evaluation.mean, evaluation.half_width
                ));
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serializes")
    }

    /// Writes the rendered report under a timestamped file name inside
    /// `outdir` (created if needed) and returns the path written.
    pub fn export(&self, outdir: &Path, format: ReportFormat) -> Result<PathBuf, Error> {
        fs::create_dir_all(outdir)?;
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = outdir.join(format!("{timestamp}.{}", format.extension()));

        let mut file = fs::File::create(&path)?;
        file.write_all(self.render(format).as_bytes())?;
        Ok(path)
    }
}

/// Runs every classifier against every dataset under one fold count and
/// collects the grid of evaluations. Classifiers are visited in name order
/// so the report rows are stable.
pub struct Benchmark {
    datasets: Vec<Dataset>,
    classifiers: Vec<Box<dyn Classifier>>,
    num_folds: usize,
    rng: StdRng,
}

impl Benchmark {
    pub fn new(
        datasets: Vec<Dataset>,
        mut classifiers: Vec<Box<dyn Classifier>>,
        num_folds: usize,
        rng: StdRng,
    ) -> Self {
        classifiers.sort_by_key(|classifier| classifier.name());
        Self {
            datasets,
            classifiers,
            num_folds,
            rng,
        }
    }

    pub fn run(&mut self) -> Result<BenchmarkReport, ModelError> {
        let datasets: Vec<String> = self
            .datasets
            .iter()
            .map(|dataset| dataset.name().to_string())
            .collect();

        let mut rows = Vec::with_capacity(self.classifiers.len());
        for classifier in &mut self.classifiers {
            println!("Testing classifier: {}", classifier.name());
            let mut evaluations = Vec::with_capacity(self.datasets.len());
            for dataset in &self.datasets {
                println!("  data set: {}", dataset.name());
                let evaluation =
                    CrossValidator::new(classifier.as_mut(), dataset, self.num_folds, &mut self.rng)?
                        .evaluate()?;
                evaluations.push(evaluation);
            }
            rows.push(ReportRow {
                classifier: classifier.name(),
                evaluations,
            });
        }

        Ok(BenchmarkReport { datasets, rows })
    }
}
