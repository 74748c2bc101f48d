//! Observer port - abstraction for experiment observation and data collection
//!
//! This port defines the interface for observing matches between
//! strategies, allowing composable progress reporting and event logging
//! without coupling the match driver to specific output formats.

use std::time::Duration;

use crate::{
    Result,
    pipeline::ExperimentResult,
    tictactoe::{Move, Outcome, Player},
};

/// Observer trait for monitoring experiments
///
/// Observers can be composed to collect different data while games are
/// played: progress bars, JSONL event logs or in-memory metrics.
///
/// # Event Sequence
///
/// 1. `on_experiment_start(name, total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num, opener)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_experiment_end(result)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_search::{ports::Observer, tictactoe::Outcome};
///
/// struct TieCounter {
///     ties: usize,
/// }
///
/// impl Observer for TieCounter {
///     fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> ttt_search::Result<()> {
///         if outcome == Outcome::Tie {
///             self.ties += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game of an experiment.
    fn on_experiment_start(&mut self, _name: &str, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called before each game, with the player that opens it.
    fn on_game_start(&mut self, _game_num: usize, _opener: Player) -> Result<()> {
        Ok(())
    }

    /// Called after each move is applied.
    ///
    /// `ply` counts moves from zero within the game and `elapsed` is the
    /// time the mover's strategy spent choosing.
    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _player: Player,
        _mv: Move,
        _elapsed: Duration,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game is decided.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game with the tallied result.
    fn on_experiment_end(&mut self, _result: &ExperimentResult) -> Result<()> {
        Ok(())
    }
}
