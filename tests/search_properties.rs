//! Properties of the search strategies over random reachable positions

mod common;

use common::{board, random_open_position};
use rand::{SeedableRng, rngs::StdRng};
use ttt_search::{
    pipeline::{Experiment, ExperimentConfig, Opening},
    strategy::{
        HeuristicMinimaxStrategy, LOSS_SCORE, MinimaxStrategy, Strategy, StrategyKind, TIE_SCORE,
        WIN_SCORE,
    },
    tictactoe::{Board, GameTree, Move, Outcome, Player, winner},
};

/// Random undecided position with at least three stones, so exact search stays cheap
fn searchable_position(rng: &mut StdRng) -> (Board, Player) {
    loop {
        let (position, to_move) = random_open_position(rng);
        if position.occupied_count() >= 3 {
            return (position, to_move);
        }
    }
}

#[test]
fn full_depth_heuristic_matches_exact_minimax() {
    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..40 {
        let (position, to_move) = searchable_position(&mut rng);
        let remaining = 9 - position.occupied_count();

        let mut exact = MinimaxStrategy::new(to_move);
        let mut heuristic = HeuristicMinimaxStrategy::new(to_move, remaining).unwrap();
        let mut exact_tree = GameTree::new(position, to_move);
        let mut heuristic_tree = GameTree::new(position, to_move);

        assert_eq!(
            exact.score_moves(&mut exact_tree).unwrap(),
            heuristic.score_moves(&mut heuristic_tree).unwrap(),
            "scores differ on\n{position}"
        );
        assert_eq!(
            exact.choose_move(&mut exact_tree).unwrap(),
            heuristic.choose_move(&mut heuristic_tree).unwrap()
        );
    }
}

#[test]
fn every_strategy_returns_a_legal_move() {
    let mut rng = StdRng::seed_from_u64(11);
    for round in 0..60 {
        let (position, to_move) = searchable_position(&mut rng);
        for kind in [
            StrategyKind::Random,
            StrategyKind::Minimax,
            StrategyKind::Heuristic { max_depth: 2 },
        ] {
            let mut tree = GameTree::new(position, to_move);
            let mut strategy = kind.build(to_move, Some(round), false).unwrap();
            let mv = strategy.choose_move(&mut tree).unwrap();
            assert!(position.legal_moves().contains(&mv), "{kind} played {mv}");
            // Choosing never moves the root
            assert_eq!(tree.board(), &position);
        }
    }
}

#[test]
fn minimax_value_is_realised_in_self_play() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..25 {
        let (position, to_move) = searchable_position(&mut rng);

        let mut tree = GameTree::new(position, to_move);
        let value = MinimaxStrategy::new(to_move)
            .score_moves(&mut tree)
            .unwrap()
            .into_iter()
            .map(|(_, score)| score)
            .max()
            .unwrap();

        let mut x = MinimaxStrategy::new(Player::X);
        let mut o = MinimaxStrategy::new(Player::O);
        let mut current = to_move;
        while !winner(tree.board()).is_decided() {
            let mv: Move = match current {
                Player::X => x.choose_move(&mut tree).unwrap(),
                Player::O => o.choose_move(&mut tree).unwrap(),
            };
            tree.advance(mv, current).unwrap();
            current = current.opponent();
        }

        let realised = match winner(tree.board()) {
            Outcome::Win(player) if player == to_move => WIN_SCORE,
            Outcome::Win(_) => LOSS_SCORE,
            _ => TIE_SCORE,
        };
        assert_eq!(realised, value, "self-play from\n{position}");
    }
}

#[test]
fn minimax_blocks_and_wins_in_known_positions() {
    let cases = [
        ("XX./OO./...", Player::X, Move { row: 0, col: 2 }),
        ("X../OO./..X", Player::X, Move { row: 1, col: 2 }),
        ("OXX/O.X/...", Player::O, Move { row: 2, col: 0 }),
    ];
    for (text, to_move, expected) in cases {
        let mut tree = GameTree::new(board(text), to_move);
        let mv = MinimaxStrategy::new(to_move).choose_move(&mut tree).unwrap();
        assert_eq!(mv, expected, "{to_move} on {text}");
    }
}

#[test]
fn minimax_self_play_ties_from_either_opening() {
    for opening in [Opening::First, Opening::Second] {
        let config = ExperimentConfig::new(StrategyKind::Minimax, StrategyKind::Minimax)
            .with_games(2)
            .with_opening(opening);
        let result = Experiment::new(config).unwrap().run().unwrap();
        assert_eq!(result.ties, 2, "opening {opening}");
    }
}

#[test]
fn minimax_never_loses_to_random() {
    let config = ExperimentConfig::new(StrategyKind::Minimax, StrategyKind::Random)
        .with_games(12)
        .with_seed(Some(2024));
    let result = Experiment::new(config).unwrap().run().unwrap();
    assert_eq!(result.second_wins, 0);
    assert_eq!(result.first_wins + result.ties, 12);
}

#[test]
fn deeper_heuristic_never_loses_to_random() {
    let heuristic = StrategyKind::Heuristic { max_depth: 9 };
    let config = ExperimentConfig::new(StrategyKind::Random, heuristic)
        .with_games(12)
        .with_seed(Some(7));
    let result = Experiment::new(config).unwrap().run().unwrap();
    assert_eq!(result.first_wins, 0);
}
