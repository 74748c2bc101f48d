//! Subcommands of the `ttt` binary, each an `Args` struct plus `execute`

pub mod best_move;
pub mod play;
pub mod suite;
pub mod tree;
