//! Tic-Tac-Toe game-tree search
//!
//! This crate provides:
//! - Board rules: legal moves, move application and win detection
//! - A lazily expanded game tree that doubles as the cursor of a game
//! - Random, exhaustive minimax and depth-limited heuristic strategies
//! - Experiments that pit two strategies against each other, with
//!   observers for progress, metrics and JSONL event logs
//! - CSV and JSON export of experiment results

pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod strategy;
pub mod tictactoe;

pub use error::{Error, Result};
