//! Move selection strategies over the game tree
//!
//! Every strategy looks at the children of the tree's current root and
//! returns one of their moves:
//! - [`RandomStrategy`] picks uniformly
//! - [`MinimaxStrategy`] searches to decided positions
//! - [`HeuristicMinimaxStrategy`] searches to a fixed depth and scores the
//!   frontier with a positional evaluation

pub mod heuristic;
pub mod minimax;
pub mod random;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use heuristic::{HeuristicMinimaxStrategy, POSITION_WEIGHTS, evaluate_position};
pub use minimax::{LOSS_SCORE, MinimaxStrategy, TIE_SCORE, TieBreak, WIN_SCORE};
pub use random::RandomStrategy;

use crate::{
    Error, Result,
    tictactoe::{GameTree, Move, Node, Player},
};

/// Depth used when a heuristic strategy is requested without one
pub const DEFAULT_HEURISTIC_DEPTH: usize = 10;

/// A decision procedure that picks the next move for one player
pub trait Strategy: Send {
    /// Choose a move among the children of the tree's current root.
    ///
    /// The tree may grow (children are expanded lazily) but its root is left
    /// in place.
    ///
    /// # Errors
    ///
    /// - [`Error::NoMovesAvailable`] if the root position is already decided
    /// - [`Error::Turn`] if it is not this strategy's player to move
    fn choose_move(&mut self, tree: &mut GameTree) -> Result<Move>;

    /// Player this strategy moves for
    fn player(&self) -> Player;

    /// Human-readable name used in reports
    fn name(&self) -> &str;

    /// Reseed any internal randomness. Deterministic strategies ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

/// Children of the root that `player` may choose from
pub(crate) fn playable_children(tree: &mut GameTree, player: Player) -> Result<&mut [Node]> {
    let to_move = tree.to_move();
    let children = tree.root_children();
    if children.is_empty() {
        return Err(Error::NoMovesAvailable);
    }
    if to_move != player {
        return Err(Error::Turn {
            expected: to_move.symbol(),
            got: player.symbol(),
        });
    }
    Ok(children)
}

/// Strategy selection by name, as used by experiments and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Random,
    Minimax,
    Heuristic { max_depth: usize },
}

impl StrategyKind {
    /// Build a boxed strategy playing `player`.
    ///
    /// `seed` drives the random strategy and, with `shuffle_ties`, the
    /// top-level move order of the minimax strategies.
    pub fn build(
        self,
        player: Player,
        seed: Option<u64>,
        shuffle_ties: bool,
    ) -> Result<Box<dyn Strategy>> {
        let tie_break = || {
            if shuffle_ties {
                TieBreak::shuffled(seed)
            } else {
                TieBreak::FirstEncountered
            }
        };

        let strategy: Box<dyn Strategy> = match self {
            StrategyKind::Random => Box::new(match seed {
                Some(seed) => RandomStrategy::with_seed(player, seed),
                None => RandomStrategy::new(player),
            }),
            StrategyKind::Minimax => {
                Box::new(MinimaxStrategy::new(player).with_tie_break(tie_break()))
            }
            StrategyKind::Heuristic { max_depth } => Box::new(
                HeuristicMinimaxStrategy::new(player, max_depth)?.with_tie_break(tie_break()),
            ),
        };
        Ok(strategy)
    }

    /// Human-readable name
    pub fn name(&self) -> String {
        match self {
            StrategyKind::Random => "Random".to_string(),
            StrategyKind::Minimax => "Minimax".to_string(),
            StrategyKind::Heuristic { max_depth } => {
                format!("Heuristic MiniMax with depth {max_depth}")
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Random => f.write_str("random"),
            StrategyKind::Minimax => f.write_str("minimax"),
            StrategyKind::Heuristic { max_depth } => write!(f, "heuristic:{max_depth}"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().to_ascii_lowercase();
        let (name, depth) = match normalised.split_once([':', '=']) {
            Some((name, depth)) => (name, Some(depth)),
            None => (normalised.as_str(), None),
        };

        let unknown = || Error::UnknownStrategy {
            input: s.to_string(),
            expected: "random, minimax, heuristic[:<depth>]".to_string(),
        };

        match (name, depth) {
            ("random", None) => Ok(StrategyKind::Random),
            ("minimax" | "exact", None) => Ok(StrategyKind::Minimax),
            ("heuristic", None) => Ok(StrategyKind::Heuristic {
                max_depth: DEFAULT_HEURISTIC_DEPTH,
            }),
            ("heuristic", Some(depth)) => {
                let max_depth = depth.parse().map_err(|_| Error::InvalidConfiguration {
                    message: format!("heuristic depth '{depth}' is not a non-negative integer"),
                })?;
                Ok(StrategyKind::Heuristic { max_depth })
            }
            _ => Err(unknown()),
        }
    }
}
