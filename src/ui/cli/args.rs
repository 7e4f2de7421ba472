use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Command-line options for a scripted benchmark run.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Benchmark categorical classifiers with k-fold cross-validation"
)]
pub struct Cli {
    /// Dataset files to evaluate (comma-separated rows, class label last)
    #[arg(
        long = "data",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        required = true,
        value_delimiter = ','
    )]
    pub data: Vec<PathBuf>,

    /// Classifiers to run (e.g. naive-bayes,tree-naive-bayes,id3,knn5);
    /// omit to run the full registry
    #[arg(long, value_name = "SPEC", value_delimiter = ',')]
    pub classifiers: Vec<String>,

    /// Number of cross-validation folds
    #[arg(
        long,
        default_value_t = 10,
        value_name = "K",
        value_parser = clap::value_parser!(u64).range(2..),
    )]
    pub folds: u64,

    /// Seed for shuffling and tie-breaking (omit for OS randomness)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Equal-width buckets used to discretize numeric columns
    #[arg(
        long,
        default_value_t = 10,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub bins: u64,

    /// Directory for the rendered report
    #[arg(
        long,
        default_value = "results",
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    pub outdir: PathBuf,

    /// Report format (latex, csv, json)
    #[arg(long, default_value = "latex", value_name = "FORMAT")]
    pub format: String,
}
