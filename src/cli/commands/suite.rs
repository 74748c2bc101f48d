//! Suite command - Run the standard batch of experiments and export a table

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{CommonArgs, CommonConfig},
        output::{print_kv, print_results_table, print_section, print_subsection},
    },
    export::ResultsCsvExporter,
    pipeline::{
        ExperimentConfig, ExperimentResult, Observer, ProgressObserver, load_suite, run_suite,
        standard_suite,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Run a batch of experiments and export the results")]
pub struct SuiteArgs {
    /// Games per experiment in the standard suite
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Read the experiment list from a JSON file instead of the standard suite
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV results table
    #[arg(long, default_value = "results.csv")]
    pub csv: PathBuf,

    /// Also save every result as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SuiteArgs {
    /// Experiments to run, in order
    pub fn experiments(&self) -> Result<Vec<ExperimentConfig>> {
        let common = CommonConfig::from(&self.common);
        match &self.config {
            Some(path) => load_suite(path)
                .with_context(|| format!("Failed to load suite from {}", path.display())),
            None => Ok(standard_suite(self.games, common.seed)),
        }
    }
}

/// Execute the suite command
pub fn execute(args: SuiteArgs) -> Result<()> {
    run(&args).map(|_| ())
}

/// Run every experiment, print the table and write the exports
pub fn run(args: &SuiteArgs) -> Result<Vec<ExperimentResult>> {
    let started = Instant::now();
    let common = CommonConfig::from(&args.common);
    let configs = args.experiments()?;

    print_section("Experiment suite");
    print_kv("Experiments", &configs.len().to_string());
    if let Some(path) = &args.config {
        print_kv("Suite file", &path.display().to_string());
    } else {
        print_kv("Games each", &args.games.to_string());
    }
    if let Some(seed) = common.seed {
        print_kv("Seed", &seed.to_string());
    }

    let results = run_suite(&configs, |_| {
        let mut observers: Vec<Box<dyn Observer>> = Vec::new();
        if common.progress {
            observers.push(Box::new(ProgressObserver::new()));
        }
        Ok(observers)
    })?;

    print_subsection("Results");
    print_results_table(&results);

    let rows = ResultsCsvExporter::write(&args.csv, &results)
        .with_context(|| format!("Failed to write {}", args.csv.display()))?;
    println!("\n✓ {rows} rows written to: {}", args.csv.display());

    if let Some(path) = &args.json {
        ResultsCsvExporter::write_json(path, &results)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Results saved to: {}", path.display());
    }

    println!(
        "\nProgram execution time: {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_suite_uses_games_and_seed() {
        let args = SuiteArgs::parse_from(["suite", "--games", "5", "--seed", "3"]);
        assert_eq!(args.csv, PathBuf::from("results.csv"));

        let experiments = args.experiments().unwrap();
        assert_eq!(experiments.len(), 17);
        assert!(experiments.iter().all(|c| c.games == 5));
        assert_eq!(experiments[0].seed, Some(3));
    }

    #[test]
    fn missing_suite_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let args = SuiteArgs::parse_from(["suite", "--config", missing.to_str().unwrap()]);
        let err = args.experiments().unwrap_err();
        assert!(err.to_string().contains("Failed to load suite"));
    }
}
