//! Best-move command - Ask one strategy for its move on a given position

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    strategy::{HeuristicMinimaxStrategy, MinimaxStrategy, StrategyKind},
    tictactoe::{Board, GameTree, Move, Player},
};

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::X),
        "o" | "second" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Side to move on `board`: X has made as many moves as O, or one more
pub(crate) fn infer_player(board: &Board) -> Result<Player> {
    let count = |player: Player| {
        board
            .cells
            .iter()
            .filter(|&&cell| cell == player.to_cell())
            .count()
    };
    let (x, o) = (count(Player::X), count(Player::O));
    if x == o {
        Ok(Player::X)
    } else if x == o + 1 {
        Ok(Player::O)
    } else {
        Err(anyhow!(
            "Cannot tell whose turn it is with {x} X and {o} O; pass --player"
        ))
    }
}

#[derive(Parser, Debug)]
#[command(about = "Show the move a strategy picks on a position")]
pub struct BestMoveArgs {
    /// Board as nine cells, row by row: X, O and '.' for empty ('/' and spaces are ignored)
    #[arg(long, short = 'b')]
    pub board: String,

    /// Side to move (`x` or `o`); inferred from the stone counts when omitted
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Strategy to ask (random, minimax, heuristic[:<depth>])
    #[arg(long, short = 's', default_value = "minimax")]
    pub strategy: StrategyKind,

    /// Random seed for the random strategy
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute the best-move command
pub fn execute(args: BestMoveArgs) -> Result<()> {
    run(&args).map(|_| ())
}

/// Pick a move and print the per-move scores when the strategy has them
pub fn run(args: &BestMoveArgs) -> Result<Move> {
    let board = Board::parse(&args.board)?;
    let player = match &args.player {
        Some(token) => parse_player_token(token, "--player")?,
        None => infer_player(&board)?,
    };

    print_section(&format!("{player} to move"));
    println!("{board}");
    print_kv("Strategy", &args.strategy.name());

    let mut tree = GameTree::new(board, player);
    let scores = match args.strategy {
        StrategyKind::Random => None,
        StrategyKind::Minimax => Some(MinimaxStrategy::new(player).score_moves(&mut tree)?),
        StrategyKind::Heuristic { max_depth } => {
            Some(HeuristicMinimaxStrategy::new(player, max_depth)?.score_moves(&mut tree)?)
        }
    };

    let mut strategy = args.strategy.build(player, args.seed, false)?;
    let mv = strategy
        .choose_move(&mut tree)
        .with_context(|| format!("{} cannot move on this board", strategy.name()))?;

    if let Some(scores) = scores {
        print_subsection("Scores (from the mover's side)");
        for (candidate, score) in scores {
            let marker = if candidate == mv { " <" } else { "" };
            println!("  {candidate} {score:>4}{marker}");
        }
    }

    print_subsection("Choice");
    print_kv("Move", &mv.to_string());
    print_kv("Nodes expanded", &format_number(tree.root().materialized_size()));
    Ok(mv)
}
