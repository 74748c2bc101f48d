//! Tree command - Expand the full game tree below a position and count it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::best_move::{infer_player, parse_player_token};
use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section},
    tictactoe::{Board, GameTree, Player, TreeStats},
};

#[derive(Parser, Debug)]
#[command(about = "Count every game reachable from a position")]
pub struct TreeArgs {
    /// Starting board (defaults to the empty board)
    #[arg(long, short = 'b', default_value = "...|...|...")]
    pub board: String,

    /// Side to move (`x` or `o`); inferred from the stone counts when omitted
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Export the counts as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TreeExport {
    board: String,
    to_move: Player,
    #[serde(flatten)]
    stats: TreeStats,
}

/// Execute the tree command
pub fn execute(args: TreeArgs) -> Result<()> {
    run(&args).map(|_| ())
}

pub fn run(args: &TreeArgs) -> Result<TreeStats> {
    let board = Board::parse(&args.board)?;
    let player = match &args.player {
        Some(token) => parse_player_token(token, "--player")?,
        None => infer_player(&board)?,
    };

    let spinner = create_spinner("Expanding game tree...");
    let mut tree = GameTree::new(board, player);
    let stats = tree.root_mut().expand_all();
    spinner.finish_and_clear();

    print_section("Game tree");
    println!("{board}");
    print_kv("To move", &player.to_string());
    print_kv("Nodes", &format_number(stats.nodes));
    print_kv("Complete games", &format_number(stats.games()));
    print_kv("X wins", &format_number(stats.x_wins));
    print_kv("O wins", &format_number(stats.o_wins));
    print_kv("Ties", &format_number(stats.ties));

    if let Some(path) = &args.export {
        let export = TreeExport {
            board: board.encode(),
            to_move: player,
            stats,
        };
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\n✓ Counts exported to: {}", path.display());
    }

    Ok(stats)
}
