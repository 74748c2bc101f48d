//! Tic-Tac-Toe rules and the lazily expanded game tree

pub mod board;
pub mod game_tree;
pub mod lines;

pub use board::{Board, Cell, Move, Outcome, Player, apply_move, legal_moves, other_player, winner};
pub use game_tree::{GameTree, Node, TreeStats};
pub use lines::{LineAnalyzer, WINNING_LINES};
