//! Observer adapters for experiments
//!
//! Observers allow composable data collection while games are played without
//! coupling the match driver to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::ExperimentResult;
use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Move, Outcome, Player},
};

/// One move as written to the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub ply: usize,
    pub player: Player,
    pub row: usize,
    pub col: usize,
    /// Time the mover spent choosing, in microseconds
    pub micros: u64,
}

/// One finished game as written to the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub experiment: String,
    pub game_num: usize,
    pub opener: Player,
    pub moves: Vec<MoveEvent>,
    /// "X", "O" or "tie"
    pub winner: String,
}

fn outcome_label(game_num: usize, outcome: Outcome) -> Result<String> {
    match outcome {
        Outcome::Win(player) => Ok(player.to_string()),
        Outcome::Tie => Ok("tie".to_string()),
        Outcome::Undecided => Err(Error::UndecidedGame { game_num }),
    }
}

/// Progress bar observer - shows how far an experiment has got
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    first_wins: usize,
    second_wins: usize,
    ties: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            first_wins: 0,
            second_wins: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} T:{}", self.first_wins, self.second_wins, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_experiment_start(&mut self, name: &str, total_games: usize) -> Result<()> {
        self.first_wins = 0;
        self.second_wins = 0;
        self.ties = 0;

        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:32} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_prefix(name.to_string());
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(Player::X) => self.first_wins += 1,
            Outcome::Win(Player::O) => self.second_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Undecided => return Err(Error::UndecidedGame { game_num }),
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_experiment_end(&mut self, _result: &ExperimentResult) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts, game lengths and think time
pub struct MetricsObserver {
    first_wins: usize,
    second_wins: usize,
    ties: usize,
    total_games: usize,
    move_counts: Vec<usize>,
    first_time: Duration,
    second_time: Duration,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            first_wins: 0,
            second_wins: 0,
            ties: 0,
            total_games: 0,
            move_counts: Vec::new(),
            first_time: Duration::ZERO,
            second_time: Duration::ZERO,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        self.rate(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.rate(self.second_wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    /// Get average game length in moves
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            first_wins: self.first_wins,
            second_wins: self.second_wins,
            ties: self.ties,
            first_win_rate: self.first_win_rate(),
            second_win_rate: self.second_win_rate(),
            tie_rate: self.tie_rate(),
            avg_game_length: self.avg_game_length(),
            first_time: self.first_time.as_secs_f64(),
            second_time: self.second_time.as_secs_f64(),
        }
    }
}

/// Summary of experiment metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub tie_rate: f64,
    pub avg_game_length: f64,
    pub first_time: f64,
    pub second_time: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize, _opener: Player) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        player: Player,
        _mv: Move,
        elapsed: Duration,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        match player {
            Player::X => self.first_time += elapsed,
            Player::O => self.second_time += elapsed,
        }
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(Player::X) => self.first_wins += 1,
            Outcome::Win(Player::O) => self.second_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Undecided => return Err(Error::UndecidedGame { game_num }),
        }
        self.total_games += 1;
        Ok(())
    }
}

/// JSONL observer - writes one line per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    experiment: String,
    opener: Player,
    current_game_moves: Vec<MoveEvent>,
}

impl JsonlObserver {
    /// Create a new JSONL observer, truncating `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create event log {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            experiment: String::new(),
            opener: Player::X,
            current_game_moves: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_experiment_start(&mut self, name: &str, _total_games: usize) -> Result<()> {
        self.experiment = name.to_string();
        Ok(())
    }

    fn on_game_start(&mut self, _game_num: usize, opener: Player) -> Result<()> {
        self.opener = opener;
        self.current_game_moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        ply: usize,
        player: Player,
        mv: Move,
        elapsed: Duration,
    ) -> Result<()> {
        self.current_game_moves.push(MoveEvent {
            ply,
            player,
            row: mv.row,
            col: mv.col,
            micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        let event = GameEvent {
            experiment: self.experiment.clone(),
            game_num,
            opener: self.opener,
            moves: std::mem::take(&mut self.current_game_moves),
            winner: outcome_label(game_num, outcome)?,
        };

        serde_json::to_writer(&mut self.writer, &event)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Shares an observer with the caller so its data can be read after the
/// experiment that owns the boxed handle has finished
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O: Observer> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    /// Lock the wrapped observer
    pub fn lock(&self) -> MutexGuard<'_, O> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_experiment_start(&mut self, name: &str, total_games: usize) -> Result<()> {
        self.lock().on_experiment_start(name, total_games)
    }

    fn on_game_start(&mut self, game_num: usize, opener: Player) -> Result<()> {
        self.lock().on_game_start(game_num, opener)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        ply: usize,
        player: Player,
        mv: Move,
        elapsed: Duration,
    ) -> Result<()> {
        self.lock().on_move(game_num, ply, player, mv, elapsed)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        self.lock().on_game_end(game_num, outcome)
    }

    fn on_experiment_end(&mut self, result: &ExperimentResult) -> Result<()> {
        self.lock().on_experiment_end(result)
    }
}
