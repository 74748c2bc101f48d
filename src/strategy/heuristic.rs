//! Depth-limited minimax with a positional evaluation at the frontier

use super::{
    Strategy,
    minimax::{Search, TieBreak},
};
use crate::{
    Error, Result,
    tictactoe::{Board, Cell, GameTree, Move, Player},
};

/// Positional weight of each cell: centre, then corners, then edges
pub const POSITION_WEIGHTS: [[i32; 3]; 3] = [[3, 2, 3], [2, 4, 2], [3, 2, 3]];

/// Static score of an undecided board from `maximizer`'s point of view.
///
/// Each cell contributes its positional weight, positive for the
/// maximizer's stones and negative for the opponent's.
pub fn evaluate_position(board: &Board, maximizer: Player) -> i32 {
    let own = maximizer.to_cell();
    board
        .cells
        .iter()
        .enumerate()
        .map(|(i, &cell)| {
            let sign = match cell {
                Cell::Empty => 0,
                c if c == own => 1,
                _ => -1,
            };
            sign * POSITION_WEIGHTS[i / 3][i % 3]
        })
        .sum()
}

/// Minimax cut off `max_depth` plies below the current position.
///
/// Decided positions are always scored as wins, losses or ties; the
/// positional evaluation only applies to undecided positions at the cutoff.
#[derive(Debug, Clone)]
pub struct HeuristicMinimaxStrategy {
    player: Player,
    search: Search,
    tie_break: TieBreak,
    name: String,
}

impl HeuristicMinimaxStrategy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `max_depth` is zero.
    pub fn new(player: Player, max_depth: usize) -> Result<Self> {
        if max_depth < 1 {
            return Err(Error::InvalidConfiguration {
                message: format!("heuristic search depth must be at least 1, got {max_depth}"),
            });
        }

        Ok(Self {
            player,
            search: Search {
                maximizer: player,
                max_depth: Some(max_depth),
            },
            tie_break: TieBreak::default(),
            name: format!("Heuristic MiniMax d={max_depth} ({player})"),
        })
    }

    /// Score positions from `maximizer`'s point of view instead of our own
    pub fn with_maximizer(mut self, maximizer: Player) -> Self {
        self.search.maximizer = maximizer;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.search.max_depth.unwrap_or(usize::MAX)
    }

    pub fn maximizer(&self) -> Player {
        self.search.maximizer
    }

    /// Depth-limited value of every available move, in search order
    pub fn score_moves(&mut self, tree: &mut GameTree) -> Result<Vec<(Move, i32)>> {
        self.search
            .score_moves(tree, self.player, &mut self.tie_break)
    }
}

impl Strategy for HeuristicMinimaxStrategy {
    fn choose_move(&mut self, tree: &mut GameTree) -> Result<Move> {
        self.search.best_move(tree, self.player, &mut self.tie_break)
    }

    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.tie_break.reseed(seed);
    }
}
