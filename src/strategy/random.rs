//! Uniform random move selection

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{Strategy, playable_children};
use crate::{
    Error, Result,
    tictactoe::{GameTree, Move, Node, Player},
};

/// Picks one of the available moves uniformly at random
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    player: Player,
    rng: StdRng,
    name: String,
}

impl RandomStrategy {
    /// Create a random strategy seeded from the thread RNG
    pub fn new(player: Player) -> Self {
        Self::with_rng(player, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a random strategy with a deterministic seed
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self::with_rng(player, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(player: Player, rng: StdRng) -> Self {
        Self {
            player,
            rng,
            name: format!("Random ({player})"),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, tree: &mut GameTree) -> Result<Move> {
        playable_children(tree, self.player)?
            .choose(&mut self.rng)
            .and_then(Node::mv)
            .ok_or(Error::NoMovesAvailable)
    }

    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tictactoe::Board;

    #[test]
    fn picks_only_legal_moves() {
        let board = Board::parse("XO./.X./..O").unwrap();
        let mut tree = GameTree::new(board, Player::X);
        let legal: HashSet<Move> = board.legal_moves().into_iter().collect();

        let mut strategy = RandomStrategy::with_seed(Player::X, 3);
        for _ in 0..50 {
            let mv = strategy.choose_move(&mut tree).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn covers_every_move_eventually() {
        let mut tree = GameTree::new(Board::new(), Player::X);
        let mut strategy = RandomStrategy::with_seed(Player::X, 42);
        let seen: HashSet<Move> = (0..500)
            .map(|_| strategy.choose_move(&mut tree).unwrap())
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn same_seed_same_sequence() {
        let sequence = |seed| {
            let mut tree = GameTree::new(Board::new(), Player::X);
            let mut strategy = RandomStrategy::with_seed(Player::X, seed);
            (0..20)
                .map(|_| strategy.choose_move(&mut tree).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(sequence(9), sequence(9));

        let mut tree = GameTree::new(Board::new(), Player::X);
        let mut strategy = RandomStrategy::with_seed(Player::X, 1);
        let first: Vec<Move> = (0..20)
            .map(|_| strategy.choose_move(&mut tree).unwrap())
            .collect();
        strategy.set_rng_seed(1);
        let again: Vec<Move> = (0..20)
            .map(|_| strategy.choose_move(&mut tree).unwrap())
            .collect();
        assert_eq!(first, again);
    }

    #[test]
    fn no_moves_on_full_board() {
        let board = Board::parse("XOX/XOO/OXX").unwrap();
        let mut tree = GameTree::new(board, Player::O);
        let mut strategy = RandomStrategy::with_seed(Player::O, 0);
        assert!(matches!(
            strategy.choose_move(&mut tree),
            Err(Error::NoMovesAvailable)
        ));
    }
}
