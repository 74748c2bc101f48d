//! Common test utilities for the integration tests.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};
use ttt_search::tictactoe::{Board, Player, apply_move, legal_moves, winner};

/// Parse a board literal, panicking on malformed input.
pub fn board(text: &str) -> Board {
    Board::parse(text).unwrap_or_else(|err| panic!("bad board literal {text:?}: {err}"))
}

/// Play up to `plies` random moves from the empty board with `first` to move.
///
/// Stops early at a decided position. Returns the position and the side to
/// move there.
pub fn random_position(rng: &mut StdRng, first: Player, plies: usize) -> (Board, Player) {
    let mut board = Board::new();
    let mut to_move = first;
    for _ in 0..plies {
        if winner(&board).is_decided() {
            break;
        }
        let moves = legal_moves(&board);
        let mv = *moves.choose(rng).unwrap();
        board = apply_move(&board, mv, to_move).unwrap();
        to_move = to_move.opponent();
    }
    (board, to_move)
}

/// A random undecided position reached from the empty board.
#[allow(dead_code)]
pub fn random_open_position(rng: &mut StdRng) -> (Board, Player) {
    loop {
        let first = if rng.random_bool(0.5) { Player::X } else { Player::O };
        let plies = rng.random_range(0..=7);
        let (board, to_move) = random_position(rng, first, plies);
        if !winner(&board).is_decided() {
            return (board, to_move);
        }
    }
}
