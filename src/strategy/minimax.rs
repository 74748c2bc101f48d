//! Minimax search over the lazily expanded game tree

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{Strategy, heuristic::evaluate_position, playable_children};
use crate::{
    Error, Result,
    tictactoe::{GameTree, Move, Node, Outcome, Player},
};

/// Score of a position won by the maximizing player
pub const WIN_SCORE: i32 = 10;
/// Score of a position won by the opponent of the maximizing player
pub const LOSS_SCORE: i32 = -10;
/// Score of a tied position
pub const TIE_SCORE: i32 = 0;

/// Iteration order for the candidate moves at the search root.
///
/// Only the order in which equally scored candidates are met changes; the
/// scores themselves do not depend on it.
#[derive(Debug, Clone, Default)]
pub enum TieBreak {
    /// Row-major order; the earliest of equally good moves wins
    #[default]
    FirstEncountered,
    /// Shuffle candidates before every decision
    Shuffled(StdRng),
}

impl TieBreak {
    /// Shuffled tie-breaking, seeded for reproducibility when `seed` is given
    pub fn shuffled(seed: Option<u64>) -> Self {
        TieBreak::Shuffled(match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        })
    }

    fn arrange(&mut self, order: &mut [usize]) {
        if let TieBreak::Shuffled(rng) = self {
            order.shuffle(rng);
        }
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        if let TieBreak::Shuffled(rng) = self {
            *rng = StdRng::seed_from_u64(seed);
        }
    }
}

/// Recursive minimax scorer shared by the exact and depth-limited strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Search {
    /// Player whose wins score [`WIN_SCORE`]
    pub maximizer: Player,
    /// Plies below the search root after which undecided positions are
    /// scored statically; `None` searches to decided positions
    pub max_depth: Option<usize>,
}

impl Search {
    /// Score of a decided outcome from the maximizer's point of view
    pub fn terminal_score(&self, outcome: Outcome) -> Option<i32> {
        match outcome {
            Outcome::Win(player) if player == self.maximizer => Some(WIN_SCORE),
            Outcome::Win(_) => Some(LOSS_SCORE),
            Outcome::Tie => Some(TIE_SCORE),
            Outcome::Undecided => None,
        }
    }

    /// Minimax value of `node`, found `depth` plies below the search root
    pub fn score(&self, node: &mut Node, depth: usize) -> i32 {
        if let Some(score) = self.terminal_score(node.outcome()) {
            return score;
        }
        if self.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            return evaluate_position(node.board(), self.maximizer);
        }

        let maximizing = node.to_move() == self.maximizer;
        let scores = node
            .children()
            .iter_mut()
            .map(|child| self.score(child, depth + 1));
        let best = if maximizing { scores.max() } else { scores.min() };
        // An undecided board always has an empty cell, hence a child
        best.unwrap_or(TIE_SCORE)
    }

    /// Score every candidate move of `player` at the root of `tree`, in the
    /// order given by `tie_break`
    pub fn score_moves(
        &self,
        tree: &mut GameTree,
        player: Player,
        tie_break: &mut TieBreak,
    ) -> Result<Vec<(Move, i32)>> {
        let children = playable_children(tree, player)?;
        let mut order: Vec<usize> = (0..children.len()).collect();
        tie_break.arrange(&mut order);

        let mut scored = Vec::with_capacity(order.len());
        for index in order {
            let child = &mut children[index];
            let Some(mv) = child.mv() else {
                continue;
            };
            scored.push((mv, self.score(child, 1)));
        }
        Ok(scored)
    }

    /// Best move for `player`: argmax when `player` is the maximizer, argmin
    /// otherwise. Only a strictly better score replaces the current pick.
    pub fn best_move(
        &self,
        tree: &mut GameTree,
        player: Player,
        tie_break: &mut TieBreak,
    ) -> Result<Move> {
        let maximizing = player == self.maximizer;
        let mut best: Option<(Move, i32)> = None;

        for (mv, score) in self.score_moves(tree, player, tie_break)? {
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv).ok_or(Error::NoMovesAvailable)
    }
}

/// Exhaustive minimax: every line is searched until the game is decided.
#[derive(Debug, Clone)]
pub struct MinimaxStrategy {
    player: Player,
    search: Search,
    tie_break: TieBreak,
    name: String,
}

impl MinimaxStrategy {
    /// Minimax player that maximizes its own result
    pub fn new(player: Player) -> Self {
        Self {
            player,
            search: Search {
                maximizer: player,
                max_depth: None,
            },
            tie_break: TieBreak::default(),
            name: format!("Minimax ({player})"),
        }
    }

    /// Score positions from `maximizer`'s point of view instead of our own.
    ///
    /// When `maximizer` is the opponent this strategy minimizes.
    pub fn with_maximizer(mut self, maximizer: Player) -> Self {
        self.search.maximizer = maximizer;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn maximizer(&self) -> Player {
        self.search.maximizer
    }

    /// Minimax value of every available move, in search order
    pub fn score_moves(&mut self, tree: &mut GameTree) -> Result<Vec<(Move, i32)>> {
        self.search
            .score_moves(tree, self.player, &mut self.tie_break)
    }
}

impl Strategy for MinimaxStrategy {
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
