use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crivo::classifiers::{build_classifier, default_classifier_specs};
use crivo::core::Dataset;
use crivo::tasks::{Benchmark, ReportFormat};
use crivo::ui::cli::args::Cli;
use crivo::utils::rng::{offset_seed, rng_from_seed};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = ReportFormat::from_str(&cli.format)
        .map_err(|_| anyhow!("unknown report format '{}'", cli.format))?;

    let mut rng = rng_from_seed(cli.seed);
    let mut datasets = Vec::with_capacity(cli.data.len());
    for path in &cli.data {
        let dataset = Dataset::from_csv_file(path, cli.bins as usize, &mut rng)
            .with_context(|| format!("failed to load {}", path.display()))?;
        datasets.push(dataset);
    }

    let specs = if cli.classifiers.is_empty() {
        default_classifier_specs()
    } else {
        cli.classifiers.clone()
    };
    let mut classifiers = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let classifier = build_classifier(spec, offset_seed(cli.seed, index as u64 + 1))
            .with_context(|| format!("failed to build classifier '{spec}'"))?;
        classifiers.push(classifier);
    }

    println!("{BOLD}{FG_CYAN}▶ Cross-validated benchmark{RESET}");
    println!(
        "{DIM}folds={}  datasets={}  classifiers={}{RESET}",
        cli.folds,
        datasets.len(),
        classifiers.len()
    );

    let mut benchmark = Benchmark::new(datasets, classifiers, cli.folds as usize, rng);
    let report = benchmark.run().context("benchmark run failed")?;

    let path = report
        .export(&cli.outdir, format)
        .with_context(|| format!("failed to write report under {}", cli.outdir.display()))?;
    println!("Report written to {}", path.display());

    Ok(())
}
