//! Head-to-head matches between two strategies

use std::{
    fmt,
    path::Path,
    str::FromStr,
    time::{Duration, Instant},
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    strategy::{Strategy, StrategyKind},
    tictactoe::{Board, GameTree, Move, Outcome, Player, apply_move, winner},
};

/// Which side opens each game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opening {
    /// Pick the opener uniformly at random for every game
    #[default]
    Random,
    /// The first strategy (X) always opens
    First,
    /// The second strategy (O) always opens
    Second,
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Opening::Random => "random",
            Opening::First => "first",
            Opening::Second => "second",
        })
    }
}

impl FromStr for Opening {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Opening::Random),
            "first" | "x" => Ok(Opening::First),
            "second" | "o" => Ok(Opening::Second),
            _ => Err(Error::InvalidConfiguration {
                message: format!("unknown opening '{s}' (expected random, first or second)"),
            }),
        }
    }
}

/// Experiment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Label used in reports; defaults to "<first> vs <second>"
    #[serde(default)]
    pub name: Option<String>,

    /// Strategy playing X
    pub first: StrategyKind,

    /// Strategy playing O
    pub second: StrategyKind,

    /// Number of games to play
    pub games: usize,

    /// Random seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Who opens each game
    #[serde(default)]
    pub opening: Opening,

    /// Shuffle equally scored moves in the minimax strategies
    #[serde(default)]
    pub shuffle_ties: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: None,
            first: StrategyKind::Random,
            second: StrategyKind::Minimax,
            games: 100,
            seed: None,
            opening: Opening::Random,
            shuffle_ties: false,
        }
    }
}

impl ExperimentConfig {
    pub fn new(first: StrategyKind, second: StrategyKind) -> Self {
        Self {
            first,
            second,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.opening = opening;
        self
    }

    pub fn with_shuffle_ties(mut self, shuffle_ties: bool) -> Self {
        self.shuffle_ties = shuffle_ties;
        self
    }

    /// Name shown in reports and exports
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{} vs {}", self.first.name(), self.second.name()))
    }

    /// Check the configuration without building any strategy
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(Error::InvalidConfiguration {
                message: "an experiment needs at least one game".to_string(),
            });
        }
        for kind in [self.first, self.second] {
            if let StrategyKind::Heuristic { max_depth: 0 } = kind {
                return Err(Error::InvalidConfiguration {
                    message: format!("{kind}: heuristic search depth must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

/// Everything that happened in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_num: usize,
    pub opener: Player,
    /// Moves in the order they were played
    pub moves: Vec<(Player, Move)>,
    pub outcome: Outcome,
    /// Time the first strategy spent choosing moves in this game
    pub first_time: Duration,
    /// Time the second strategy spent choosing moves in this game
    pub second_time: Duration,
}

impl GameRecord {
    /// Final position, replayed from the empty board
    pub fn final_board(&self) -> Result<Board> {
        self.moves
            .iter()
            .try_fold(Board::new(), |board, &(player, mv)| {
                apply_move(&board, mv, player)
            })
    }
}

/// Result of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Experiment label
    pub name: String,

    /// Total games played
    pub total_games: usize,

    /// Games won by the first strategy (X)
    pub first_wins: usize,

    /// Games won by the second strategy (O)
    pub second_wins: usize,

    /// Tied games
    pub ties: usize,

    /// Seconds the first strategy spent choosing moves, summed over games
    pub first_time: f64,

    /// Seconds the second strategy spent choosing moves, summed over games
    pub second_time: f64,

    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub tie_rate: f64,
}

impl ExperimentResult {
    /// Create a new experiment result
    pub fn new(
        name: impl Into<String>,
        first_wins: usize,
        second_wins: usize,
        ties: usize,
        first_time: Duration,
        second_time: Duration,
    ) -> Self {
        let total_games = first_wins + second_wins + ties;
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            name: name.into(),
            total_games,
            first_wins,
            second_wins,
            ties,
            first_time: first_time.as_secs_f64(),
            second_time: second_time.as_secs_f64(),
            first_win_rate: rate(first_wins),
            second_win_rate: rate(second_wins),
            tie_rate: rate(ties),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// A series of games between two strategies sharing one game tree
pub struct Experiment {
    config: ExperimentConfig,
    name: String,
    first: Box<dyn Strategy>,
    second: Box<dyn Strategy>,
    tree: GameTree,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl Experiment {
    /// Build both strategies and an empty game tree
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero games or a zero
    /// heuristic depth.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed;
        let first = config.first.build(
            Player::X,
            seed.map(|s| s.wrapping_add(1)),
            config.shuffle_ties,
        )?;
        let second = config.second.build(
            Player::O,
            seed.map(|s| s.wrapping_add(2)),
            config.shuffle_ties,
        )?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            name: config.display_name(),
            config,
            first,
            second,
            tree: GameTree::new(Board::new(), Player::X),
            rng,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the experiment
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tree shared by both strategies; its root is the current position
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    fn opener(&mut self) -> Player {
        match self.config.opening {
            Opening::First => Player::X,
            Opening::Second => Player::O,
            Opening::Random => {
                if self.rng.random_bool(0.5) {
                    Player::X
                } else {
                    Player::O
                }
            }
        }
    }

    /// Play one game from the empty board until it is decided
    pub fn play_game(&mut self, game_num: usize) -> Result<GameRecord> {
        let opener = self.opener();
        let mut board = Board::new();
        self.tree.reset(board, opener);

        for observer in &mut self.observers {
            observer.on_game_start(game_num, opener)?;
        }

        let mut to_move = opener;
        let mut moves = Vec::with_capacity(9);
        let mut first_time = Duration::ZERO;
        let mut second_time = Duration::ZERO;

        let outcome = loop {
            let outcome = winner(&board);
            if outcome.is_decided() {
                break outcome;
            }

            let strategy = match to_move {
                Player::X => &mut self.first,
                Player::O => &mut self.second,
            };
            let started = Instant::now();
            let mv = strategy.choose_move(&mut self.tree)?;
            let elapsed = started.elapsed();
            match to_move {
                Player::X => first_time += elapsed,
                Player::O => second_time += elapsed,
            }

            board = apply_move(&board, mv, to_move)?;
            self.tree.advance(mv, to_move)?;
            debug_assert_eq!(self.tree.board(), &board);

            for observer in &mut self.observers {
                observer.on_move(game_num, moves.len(), to_move, mv, elapsed)?;
            }
            moves.push((to_move, mv));
            to_move = to_move.opponent();
        };

        Ok(GameRecord {
            game_num,
            opener,
            moves,
            outcome,
            first_time,
            second_time,
        })
    }

    /// Play every configured game and tally the results
    pub fn run(&mut self) -> Result<ExperimentResult> {
        let mut first_wins = 0;
        let mut second_wins = 0;
        let mut ties = 0;
        let mut first_time = Duration::ZERO;
        let mut second_time = Duration::ZERO;

        for observer in &mut self.observers {
            observer.on_experiment_start(&self.name, self.config.games)?;
        }

        for game_num in 0..self.config.games {
            let record = self.play_game(game_num)?;
            match record.outcome {
                Outcome::Win(Player::X) => first_wins += 1,
                Outcome::Win(Player::O) => second_wins += 1,
                Outcome::Tie => ties += 1,
                // play_game only returns once the board is decided
                Outcome::Undecided => return Err(Error::UndecidedGame { game_num }),
            }
            first_time += record.first_time;
            second_time += record.second_time;

            for observer in &mut self.observers {
                observer.on_game_end(game_num, record.outcome)?;
            }
        }

        let result = ExperimentResult::new(
            self.name.clone(),
            first_wins,
            second_wins,
            ties,
            first_time,
            second_time,
        );

        for observer in &mut self.observers {
            observer.on_experiment_end(&result)?;
        }

        Ok(result)
    }
}
