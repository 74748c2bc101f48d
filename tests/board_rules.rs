//! Board rules checked over many randomly reached positions

mod common;

use common::{board, random_position};
use rand::{Rng, SeedableRng, rngs::StdRng};
use ttt_search::{
    Error,
    tictactoe::{Cell, Move, Outcome, Player, apply_move, legal_moves, other_player, winner},
};

#[test]
fn legal_moves_are_exactly_the_empty_cells() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..300 {
        let plies = rng.random_range(0..=9);
        let (position, _) = random_position(&mut rng, Player::X, plies);

        let moves = legal_moves(&position);
        assert_eq!(moves.len(), 9 - position.occupied_count());
        assert!(moves.iter().all(|&mv| position.get(mv) == Some(Cell::Empty)));
        assert!(moves.windows(2).all(|pair| pair[0] < pair[1]), "row-major order");
    }
}

#[test]
fn applying_a_move_changes_one_cell() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..300 {
        let (position, to_move) = random_position(&mut rng, Player::O, 4);
        for mv in legal_moves(&position) {
            let next = apply_move(&position, mv, to_move).unwrap();
            assert_eq!(next.get(mv), Some(to_move.to_cell()));
            assert_eq!(next.occupied_count(), position.occupied_count() + 1);
            let changed = (0..9).filter(|&i| next.cells[i] != position.cells[i]).count();
            assert_eq!(changed, 1);
        }
    }
}

#[test]
fn occupied_cells_are_rejected_without_side_effects() {
    let position = board("XO./.../...");
    let attempts = [
        (Move { row: 0, col: 0 }, Player::O),
        (Move { row: 0, col: 1 }, Player::X),
    ];
    for (mv, player) in attempts {
        let err = apply_move(&position, mv, player).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
        assert!(err.to_string().contains("occupied"));
    }
    assert_eq!(position, board("XO./.../..."));
}

#[test]
fn random_games_end_decided_within_nine_plies() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = [0usize; 3];
    for game in 0..500 {
        let first = if game % 2 == 0 { Player::X } else { Player::O };
        let (position, _) = random_position(&mut rng, first, 9);
        match winner(&position) {
            Outcome::Win(Player::X) => seen[0] += 1,
            Outcome::Win(Player::O) => seen[1] += 1,
            Outcome::Tie => {
                assert!(position.is_full());
                seen[2] += 1;
            }
            Outcome::Undecided => panic!("game not decided after nine plies:\n{position}"),
        }
    }
    assert!(seen.iter().all(|&count| count > 0), "{seen:?}");
}

#[test]
fn scenario_boards() {
    assert_eq!(winner(&board("XXX/OO./...")), Outcome::Win(Player::X));
    assert_eq!(winner(&board("O.X/.OX/..O")), Outcome::Win(Player::O));
    assert_eq!(winner(&board("XOX/XOO/OXX")), Outcome::Tie);
    assert_eq!(winner(&board("XO./.../...")), Outcome::Undecided);
}

#[test]
fn other_player_swaps_symbols() {
    assert_eq!(other_player(Cell::X).unwrap(), Cell::O);
    assert_eq!(other_player(Cell::O).unwrap(), Cell::X);
    assert!(matches!(
        other_player(Cell::Empty),
        Err(Error::InvalidSymbol { .. })
    ));
}
