//! Winning line analysis for the 3x3 board

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in check order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first completed line in check order, if any.
    ///
    /// Rows are checked before columns, columns before diagonals. A legal
    /// game never completes lines for both players, so the order only
    /// matters for hand-built boards.
    pub fn first_completed_line(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let owner = Player::try_from(cells[a]).ok()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some(owner)
        })
    }
}
