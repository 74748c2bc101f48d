//! Board representation and the pure transition rules

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game. `X` is the first player, `O` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

impl TryFrom<Cell> for Player {
    type Error = Error;

    fn try_from(cell: Cell) -> Result<Self> {
        match cell {
            Cell::X => Ok(Player::X),
            Cell::O => Ok(Player::O),
            Cell::Empty => Err(Error::InvalidSymbol {
                symbol: cell.to_char(),
            }),
        }
    }
}

impl TryFrom<char> for Player {
    type Error = Error;

    fn try_from(symbol: char) -> Result<Self> {
        match Cell::from_char(symbol) {
            Some(cell) => Player::try_from(cell).map_err(|_| Error::InvalidSymbol { symbol }),
            None => Err(Error::InvalidSymbol { symbol }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A board coordinate, both components in `0..=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Create a move, rejecting coordinates outside the board
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row > 2 || col > 2 {
            return Err(Error::illegal_move(row, col, "coordinate is off the board"));
        }
        Ok(Self { row, col })
    }

    /// Move for a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Result<Self> {
        Self::new(index / 3, index % 3)
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of inspecting a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Tie,
    /// No winner yet and empty cells remain
    Undecided,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Tie | Outcome::Undecided => None,
        }
    }
}

/// Immutable 3x3 grid, stored row-major.
///
/// `Board` is `Copy`: every transition yields a fresh value, so tree nodes
/// never share mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Build a board from rows, top row first
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Parse a board such as `"XX./OO./..."`.
    ///
    /// Whitespace, `/` and `|` are ignored; `.`, `_` and `-` are empty cells.
    pub fn parse(input: &str) -> Result<Self> {
        let chars: Vec<char> = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if chars.len() != 9 {
            return Err(Error::ParseBoard {
                input: input.to_string(),
                reason: format!("expected 9 cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::ParseBoard {
                input: input.to_string(),
                reason: format!("invalid character '{c}' at cell {i}"),
            })?;
        }
        Ok(Self { cells })
    }

    /// Content of the cell at `mv`, or `None` when it is off the board
    pub fn get(&self, mv: Move) -> Option<Cell> {
        (mv.row <= 2 && mv.col <= 2).then(|| self.cells[mv.index()])
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Empty cells in row-major order
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move {
                row: i / 3,
                col: i % 3,
            })
            .collect()
    }

    /// Place `player` on `mv`, returning the new board
    #[must_use = "apply_move returns a new board; the input board is unchanged"]
    pub fn apply_move(&self, mv: Move, player: Player) -> Result<Board> {
        let occupant = self
            .get(mv)
            .ok_or_else(|| Error::illegal_move(mv.row, mv.col, "coordinate is off the board"))?;
        if occupant != Cell::Empty {
            return Err(Error::illegal_move(
                mv.row,
                mv.col,
                format!("cell is already occupied by {}", occupant.to_char()),
            ));
        }

        let mut next = *self;
        next.cells[mv.index()] = player.to_cell();
        Ok(next)
    }

    pub fn winner(&self) -> Outcome {
        if let Some(player) = LineAnalyzer::first_completed_line(&self.cells) {
            Outcome::Win(player)
        } else if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::Undecided
        }
    }

    /// Compact one-line encoding, e.g. `XX.OO....`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Coordinates of every empty cell, row-major
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board.legal_moves()
}

/// Place `player` on `mv`; fails with [`Error::IllegalMove`] on an occupied cell
pub fn apply_move(board: &Board, mv: Move, player: Player) -> Result<Board> {
    board.apply_move(mv, player)
}

/// Inspect a board for a completed line or a full grid
pub fn winner(board: &Board) -> Outcome {
    board.winner()
}

/// Swap between the two player symbols. `Cell::Empty` is not a player.
pub fn other_player(symbol: Cell) -> Result<Cell> {
    Player::try_from(symbol).map(|player| player.opponent().to_cell())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> Board {
        let mut board = Board::new();
        let mut player = Player::X;
        for &idx in moves {
            board = board
                .apply_move(Move::from_index(idx).unwrap(), player)
                .unwrap();
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for i in 0..9 {
            assert_eq!(board.cells[i], Cell::Empty);
        }
        assert_eq!(board.winner(), Outcome::Undecided);
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();
        let center = Move::new(1, 1).unwrap();

        let next = board.apply_move(center, Player::X).unwrap();
        assert_eq!(next.get(center), Some(Cell::X));
        assert_eq!(board.get(center), Some(Cell::Empty), "input must be untouched");

        let err = next.apply_move(center, Player::O).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { row: 1, col: 1, .. }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn apply_move_rejects_every_occupied_cell() {
        let board = play(&[0, 4, 8, 2, 6]);
        for mv in (0..9).map(|i| Move::from_index(i).unwrap()) {
            let result = board.apply_move(mv, Player::O);
            if board.get(mv) == Some(Cell::Empty) {
                assert_eq!(result.unwrap().get(mv), Some(Cell::O));
            } else {
                assert!(matches!(result, Err(Error::IllegalMove { .. })));
            }
        }
    }

    #[test]
    fn off_board_coordinates_are_rejected() {
        let board = play(&[0, 4]);
        assert_eq!(board.get(Move { row: 3, col: 0 }), None);
        // Would alias cell (1, 2) through the row-major index
        assert_eq!(board.get(Move { row: 0, col: 5 }), None);

        let err = board.apply_move(Move { row: 0, col: 5 }, Player::X).unwrap_err();
        assert!(err.to_string().contains("off the board"));
        assert!(Move::new(3, 0).is_err());
    }

    #[test]
    fn test_legal_moves_row_major() {
        let board = play(&[4, 0]);
        let moves = board.legal_moves();
        let indices: Vec<usize> = moves.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(moves[0], Move { row: 0, col: 1 });
    }

    #[test]
    fn test_win_detection_horizontal() {
        let board = play(&[0, 3, 1, 4, 2]);
        assert_eq!(board.winner(), Outcome::Win(Player::X));
    }

    #[test]
    fn test_win_detection_vertical() {
        // O takes the middle column
        let board = play(&[0, 1, 2, 4, 5, 7]);
        assert_eq!(board.winner(), Outcome::Win(Player::O));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = play(&[0, 1, 4, 2, 8]);
        assert_eq!(board.winner(), Outcome::Win(Player::X));
    }

    #[test]
    fn test_tie_detection() {
        let board = play(&[0, 1, 2, 4, 3, 6, 5, 8, 7]);
        assert!(board.is_full());
        assert_eq!(board.winner(), Outcome::Tie);
    }

    #[test]
    fn win_on_last_cell_is_not_a_tie() {
        // X O X
        // O X O
        // O X X  -> X completes the main diagonal with the ninth stone
        let board = Board::parse("XOX/OXO/OXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), Outcome::Win(Player::X));
    }

    #[test]
    fn test_other_player() {
        assert_eq!(other_player(Cell::X).unwrap(), Cell::O);
        assert_eq!(other_player(Cell::O).unwrap(), Cell::X);
        for symbol in [Cell::X, Cell::O] {
            assert_eq!(other_player(other_player(symbol).unwrap()).unwrap(), symbol);
        }
        assert!(matches!(
            other_player(Cell::Empty),
            Err(Error::InvalidSymbol { symbol: '.' })
        ));
    }

    #[test]
    fn player_from_char() {
        assert_eq!(Player::try_from('x').unwrap(), Player::X);
        assert_eq!(Player::try_from('O').unwrap(), Player::O);
        assert!(matches!(
            Player::try_from('Z'),
            Err(Error::InvalidSymbol { symbol: 'Z' })
        ));
        assert!(Player::try_from('.').is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let board = Board::parse("XX. | OO. | ...").unwrap();
        assert_eq!(board.encode(), "XX.OO....");
        assert_eq!(board.to_string(), "XX.\nOO.\n...");
        assert_eq!(
            board,
            Board::from_rows([
                [Cell::X, Cell::X, Cell::Empty],
                [Cell::O, Cell::O, Cell::Empty],
                [Cell::Empty; 3],
            ])
        );

        assert!(matches!(
            Board::parse("XX"),
            Err(Error::ParseBoard { .. })
        ));
        assert!(Board::parse("XX?OO....").is_err());
    }

    #[test]
    fn move_bounds() {
        assert!(Move::new(2, 2).is_ok());
        assert!(matches!(Move::new(3, 0), Err(Error::IllegalMove { .. })));
        assert_eq!(Move::from_index(5).unwrap(), Move { row: 1, col: 2 });
        assert!(Move::from_index(9).is_err());
    }
}
