//! Error types for the tic-tac-toe search crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("it is not {got}'s turn (expected {expected})")]
    Turn { expected: char, got: char },

    #[error("invalid player symbol '{symbol}' (expected 'X' or 'O')")]
    InvalidSymbol { symbol: char },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("no moves available: position is already decided")]
    NoMovesAvailable,

    #[error("game {game_num} was reported finished while still undecided")]
    UndecidedGame { game_num: usize },

    #[error("unknown strategy '{input}'. Expected one of: {expected}")]
    UnknownStrategy { input: String, expected: String },

    #[error("invalid board string '{input}': {reason}")]
    ParseBoard { input: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn illegal_move(row: usize, col: usize, reason: impl Into<String>) -> Self {
        Error::IllegalMove {
            row,
            col,
            reason: reason.into(),
        }
    }
}
