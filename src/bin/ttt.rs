//! ttt CLI - play and compare tic-tac-toe search strategies
//!
//! This CLI provides a unified interface for:
//! - Playing two strategies against each other
//! - Running the standard experiment suite with CSV export
//! - Inspecting the move a strategy picks on a position
//! - Counting the game tree below a position

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Tic-tac-toe game-tree search toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play two strategies against each other
    Play(ttt_search::cli::commands::play::PlayArgs),

    /// Run a batch of experiments and export the results
    Suite(ttt_search::cli::commands::suite::SuiteArgs),

    /// Show the move a strategy picks on a position
    BestMove(ttt_search::cli::commands::best_move::BestMoveArgs),

    /// Count every game reachable from a position
    Tree(ttt_search::cli::commands::tree::TreeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => ttt_search::cli::commands::play::execute(args),
        Commands::Suite(args) => ttt_search::cli::commands::suite::execute(args),
        Commands::BestMove(args) => ttt_search::cli::commands::best_move::execute(args),
        Commands::Tree(args) => ttt_search::cli::commands::tree::execute(args),
    }
}
