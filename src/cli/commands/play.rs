//! Play command - Run one experiment between two strategies

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{CommonArgs, CommonConfig},
        output::{print_kv, print_result, print_section},
    },
    pipeline::{
        Experiment, ExperimentConfig, ExperimentResult, JsonlObserver, MetricsObserver, Opening,
        ProgressObserver, SharedObserver,
    },
    strategy::StrategyKind,
};

#[derive(Parser, Debug)]
#[command(about = "Play two strategies against each other")]
pub struct PlayArgs {
    /// Strategy playing X (random, minimax, heuristic[:<depth>])
    #[arg(long, default_value = "random")]
    pub first: StrategyKind,

    /// Strategy playing O (random, minimax, heuristic[:<depth>])
    #[arg(long, default_value = "minimax")]
    pub second: StrategyKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Who opens each game (random, first, second)
    #[arg(long, default_value = "random")]
    pub opening: Opening,

    /// Shuffle equally scored moves in the minimax strategies
    #[arg(long)]
    pub shuffle_ties: bool,

    /// Label used in the summary and exports
    #[arg(long)]
    pub name: Option<String>,

    /// Write one JSON line per game to this file
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Save the result as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PlayArgs {
    /// Experiment configuration described by these flags
    pub fn experiment_config(&self) -> ExperimentConfig {
        let common = CommonConfig::from(&self.common);
        let config = ExperimentConfig::new(self.first, self.second)
            .with_games(self.games)
            .with_seed(common.seed)
            .with_opening(self.opening)
            .with_shuffle_ties(self.shuffle_ties);
        match &self.name {
            Some(name) => config.with_name(name.clone()),
            None => config,
        }
    }
}

/// Execute the play command
pub fn execute(args: PlayArgs) -> Result<()> {
    run(&args).map(|_| ())
}

/// Run the experiment, print a summary and write the requested files
pub fn run(args: &PlayArgs) -> Result<ExperimentResult> {
    let common = CommonConfig::from(&args.common);
    let config = args.experiment_config();

    print_section(&format!("Experiment: {}", config.display_name()));
    print_kv("First (X)", &config.first.name());
    print_kv("Second (O)", &config.second.name());
    print_kv("Opening", &config.opening.to_string());
    print_kv("Games", &config.games.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let metrics = SharedObserver::new(MetricsObserver::new());
    let mut experiment = Experiment::new(config)?.with_observer(Box::new(metrics.clone()));
    if common.progress {
        experiment = experiment.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.events {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        experiment = experiment.with_observer(Box::new(observer));
    }

    let result = experiment.run()?;

    print_section("Results");
    print_result(&result);
    print_kv(
        "Average game length",
        &format!("{:.2} moves", metrics.lock().avg_game_length()),
    );

    if let Some(path) = &args.events {
        println!("\n✓ Game events written to: {}", path.display());
    }
    if let Some(path) = &args.json {
        result
            .save(path)
            .with_context(|| format!("Failed to save result to {}", path.display()))?;
        println!("✓ Result saved to: {}", path.display());
    }

    Ok(result)
}
