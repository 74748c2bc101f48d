//! Batches of experiments

use std::{fs::File, path::Path};

use super::{Experiment, ExperimentConfig, ExperimentResult};
use crate::{Error, Result, ports::Observer, strategy::StrategyKind};

/// Deepest heuristic search in the standard suite
pub const SUITE_MAX_DEPTH: usize = 8;

/// The standard comparison batch:
/// - Random vs Minimax
/// - Random vs Heuristic MiniMax at depths 1 to 8
/// - Minimax vs Heuristic MiniMax at depths 1 to 8
///
/// Experiment `i` is seeded with `seed + i` so runs are independent but
/// reproducible.
pub fn standard_suite(games: usize, seed: Option<u64>) -> Vec<ExperimentConfig> {
    let heuristics = || (1..=SUITE_MAX_DEPTH).map(|max_depth| StrategyKind::Heuristic { max_depth });

    std::iter::once((StrategyKind::Random, StrategyKind::Minimax))
        .chain(heuristics().map(|h| (StrategyKind::Random, h)))
        .chain(heuristics().map(|h| (StrategyKind::Minimax, h)))
        .enumerate()
        .map(|(i, (first, second))| {
            ExperimentConfig::new(first, second)
                .with_games(games)
                .with_seed(seed.map(|s| s.wrapping_add(i as u64)))
        })
        .collect()
}

/// Read a list of experiment configurations from a JSON file
pub fn load_suite<P: AsRef<Path>>(path: P) -> Result<Vec<ExperimentConfig>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open suite file {}", path.display()),
        source,
    })?;
    let configs: Vec<ExperimentConfig> = serde_json::from_reader(file)?;
    if configs.is_empty() {
        return Err(Error::InvalidConfiguration {
            message: format!("suite file {} lists no experiments", path.display()),
        });
    }
    Ok(configs)
}

/// Run `configs` in order.
///
/// `observers` is called once per experiment and returns the observers
/// attached to it. Every configuration is validated before the first game
/// is played.
pub fn run_suite<F>(configs: &[ExperimentConfig], mut observers: F) -> Result<Vec<ExperimentResult>>
where
    F: FnMut(&ExperimentConfig) -> Result<Vec<Box<dyn Observer>>>,
{
    for config in configs {
        config.validate()?;
    }

    let mut results = Vec::with_capacity(configs.len());
    for config in configs {
        let mut experiment = Experiment::new(config.clone())?;
        for observer in observers(config)? {
            experiment = experiment.with_observer(observer);
        }
        results.push(experiment.run()?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_suite_layout() {
        let suite = standard_suite(100, Some(5));
        assert_eq!(suite.len(), 1 + 2 * SUITE_MAX_DEPTH);

        let names: Vec<String> = suite.iter().map(ExperimentConfig::display_name).collect();
        assert_eq!(names[0], "Random vs Minimax");
        assert_eq!(names[1], "Random vs Heuristic MiniMax with depth 1");
        assert_eq!(names[8], "Random vs Heuristic MiniMax with depth 8");
        assert_eq!(names[9], "Minimax vs Heuristic MiniMax with depth 1");
        assert_eq!(names[16], "Minimax vs Heuristic MiniMax with depth 8");

        assert!(suite.iter().all(|c| c.games == 100));
        let seeds: Vec<Option<u64>> = suite.iter().map(|c| c.seed).collect();
        assert_eq!(seeds[0], Some(5));
        assert_eq!(seeds[16], Some(21));
        assert!(standard_suite(10, None).iter().all(|c| c.seed.is_none()));
    }

    #[test]
    fn run_suite_validates_before_playing() {
        let configs = vec![
            ExperimentConfig::new(StrategyKind::Random, StrategyKind::Random).with_games(2),
            ExperimentConfig::new(StrategyKind::Random, StrategyKind::Random).with_games(0),
        ];
        let mut calls = 0;
        let result = run_suite(&configs, |_| {
            calls += 1;
            Ok(Vec::new())
        });
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn run_suite_returns_results_in_order() {
        let configs = vec![
            ExperimentConfig::new(StrategyKind::Random, StrategyKind::Random)
                .with_name("first")
                .with_games(3)
                .with_seed(Some(1)),
            ExperimentConfig::new(StrategyKind::Random, StrategyKind::Heuristic { max_depth: 1 })
                .with_name("second")
                .with_games(2)
                .with_seed(Some(2)),
        ];
        let results = run_suite(&configs, |_| Ok(Vec::new())).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "first");
        assert_eq!(results[0].total_games, 3);
        assert_eq!(results[1].name, "second");
        assert_eq!(results[1].total_games, 2);
    }
}
