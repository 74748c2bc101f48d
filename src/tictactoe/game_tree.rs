//! Lazily expanded game tree used as the search substrate and as the
//! running cursor over a game in progress.

use std::mem;

use serde::{Deserialize, Serialize};

use super::board::{Board, Move, Outcome, Player};
use crate::{Error, Result};

/// Child state of a node: children are materialised on first traversal and
/// kept for the lifetime of the node.
#[derive(Debug, Clone, Default)]
enum Children {
    #[default]
    Unexpanded,
    Expanded(Vec<Node>),
}

/// One position in the tree.
///
/// A node owns its board, the move that produced it (absent for a root),
/// the player to move, and its subtree. Positions reached through different
/// move orders are distinct nodes.
#[derive(Debug, Clone)]
pub struct Node {
    board: Board,
    mv: Option<Move>,
    to_move: Player,
    children: Children,
}

impl Node {
    /// Create a childless root node
    pub fn root(board: Board, to_move: Player) -> Self {
        Self {
            board,
            mv: None,
            to_move,
            children: Children::Unexpanded,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Move that led to this node (`None` for a root)
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Player whose move produced this node
    pub fn mover(&self) -> Option<Player> {
        self.mv.map(|_| self.to_move.opponent())
    }

    pub fn outcome(&self) -> Outcome {
        self.board.winner()
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.children, Children::Expanded(_))
    }

    /// Children of this node, expanding it on first access.
    ///
    /// One child per empty cell in row-major order. A decided board has no
    /// children.
    pub fn children(&mut self) -> &mut [Node] {
        if let Children::Unexpanded = self.children {
            self.children = Children::Expanded(self.expand());
        }
        match &mut self.children {
            Children::Expanded(children) => children.as_mut_slice(),
            Children::Unexpanded => &mut [],
        }
    }

    /// Children if they have already been materialised
    pub fn expanded_children(&self) -> Option<&[Node]> {
        match &self.children {
            Children::Expanded(children) => Some(children.as_slice()),
            Children::Unexpanded => None,
        }
    }

    /// Moves available from this node, in child order
    pub fn child_moves(&mut self) -> Vec<Move> {
        self.children().iter().filter_map(Node::mv).collect()
    }

    /// Number of nodes currently materialised in this subtree (including self)
    pub fn materialized_size(&self) -> usize {
        1 + self
            .expanded_children()
            .map_or(0, |children| children.iter().map(Node::materialized_size).sum::<usize>())
    }

    /// Materialise the whole subtree below this node and count it
    pub fn expand_all(&mut self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.tally(&mut stats);
        stats
    }

    fn tally(&mut self, stats: &mut TreeStats) {
        stats.nodes += 1;
        match self.outcome() {
            Outcome::Win(Player::X) => stats.x_wins += 1,
            Outcome::Win(Player::O) => stats.o_wins += 1,
            Outcome::Tie => stats.ties += 1,
            Outcome::Undecided => {
                for child in self.children() {
                    child.tally(stats);
                }
            }
        }
    }

    fn expand(&self) -> Vec<Node> {
        if self.outcome().is_decided() {
            return Vec::new();
        }

        let next = self.to_move.opponent();
        self.board
            .legal_moves()
            .into_iter()
            .filter_map(|mv| {
                let board = self.board.apply_move(mv, self.to_move).ok()?;
                Some(Node {
                    board,
                    mv: Some(mv),
                    to_move: next,
                    children: Children::Unexpanded,
                })
            })
            .collect()
    }
}

/// Size of a fully expanded subtree, with its decided leaves by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
}

impl TreeStats {
    /// Number of complete games in the subtree
    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.ties
    }
}

/// The game tree rooted at the current position of a game.
///
/// Playing a move replaces the root with the matching child; the siblings
/// and the previous root are dropped.
#[derive(Debug, Clone)]
pub struct GameTree {
    root: Node,
    first_player: Player,
}

impl GameTree {
    /// Create a tree for `board` with `to_move` about to play
    pub fn new(board: Board, to_move: Player) -> Self {
        Self {
            root: Node::root(board, to_move),
            first_player: to_move,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Player that was to move when the tree was created or last reset
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn board(&self) -> &Board {
        self.root.board()
    }

    pub fn to_move(&self) -> Player {
        self.root.to_move()
    }

    /// Children of the current root, expanding it if needed
    pub fn root_children(&mut self) -> &mut [Node] {
        self.root.children()
    }

    /// Descend into the child reached by `player` playing `mv`.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalMove`] if no child of the root plays `mv`
    /// - [`Error::Turn`] if `player` is not the side to move at the root
    pub fn advance(&mut self, mv: Move, player: Player) -> Result<()> {
        let index = self
            .root
            .children()
            .iter()
            .position(|child| child.mv == Some(mv))
            .ok_or_else(|| {
                Error::illegal_move(mv.row, mv.col, "move is not available from the current position")
            })?;

        if self.root.to_move != player {
            return Err(Error::Turn {
                expected: self.root.to_move.symbol(),
                got: player.symbol(),
            });
        }

        if let Children::Expanded(mut children) = mem::take(&mut self.root.children) {
            self.root = children.swap_remove(index);
        }
        Ok(())
    }

    /// Discard the whole tree and start again from `board`
    pub fn reset(&mut self, board: Board, to_move: Player) {
        self.root = Node::root(board, to_move);
        self.first_player = to_move;
    }
}
