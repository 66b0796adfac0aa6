//! Property-style tests for the board, rules and state machine.

mod common;

use common::stalemate_board;
use rand::seq::SliceRandom;
use side_stacker::{
    BOARD_SIZE, Board, Cell, GameError, GameState, GameStatus, Move, Player, Side, check_winner,
    has_four_in_row, is_draw, is_full,
};

/// Plays a uniformly random game, calling `visit` on every state reached.
fn random_game(mut visit: impl FnMut(&GameState)) -> GameState {
    let mut rng = rand::thread_rng();
    let mut state = GameState::new();
    visit(&state);
    while !state.status().is_terminal() {
        let moves = state.board().legal_moves();
        let mv = *moves.choose(&mut rng).expect("in-progress game has moves");
        state = state.apply_move(mv).expect("legal move applies");
        visit(&state);
    }
    state
}

fn count(board: &Board, player: Player) -> usize {
    board
        .rows()
        .iter()
        .flatten()
        .filter(|&&c| c == Cell::Occupied(player))
        .count()
}

#[test]
fn test_scenario_b_right_insertions_stack_inward() {
    let state = GameState::new()
        .apply_move(Move::right(0))
        .unwrap()
        .apply_move(Move::right(0))
        .unwrap();
    assert_eq!(state.board().get(0, 6), Some(Cell::Occupied(Player::X)));
    assert_eq!(state.board().get(0, 5), Some(Cell::Occupied(Player::O)));
    assert_eq!(state.board().empty_count(), BOARD_SIZE * BOARD_SIZE - 2);
}

#[test]
fn test_scenario_c_diagonal_win_detected() {
    let board = [(0, 0), (1, 1), (2, 2), (3, 3)]
        .into_iter()
        .fold(Board::new(), |b, (r, c)| b.with_cell(r, c, Cell::Occupied(Player::X)));
    assert!(has_four_in_row(&board, Player::X));
    assert!(!has_four_in_row(&board, Player::O));
    assert_eq!(check_winner(&board), Some(Player::X));
}

#[test]
fn test_legal_moves_always_apply() {
    for _ in 0..50 {
        random_game(|state| {
            if state.status().is_terminal() {
                return;
            }
            for mv in state.board().legal_moves() {
                assert!(state.board().apply(mv, state.current_player()).is_ok());
            }
        });
    }
}

#[test]
fn test_moves_outside_legal_set_fail() {
    for _ in 0..50 {
        random_game(|state| {
            let legal = state.board().legal_moves();
            for row in 0..BOARD_SIZE + 1 {
                for side in [Side::Left, Side::Right] {
                    let mv = Move::new(row, side);
                    if legal.contains(&mv) {
                        continue;
                    }
                    assert!(matches!(
                        state.board().apply(mv, Player::X),
                        Err(GameError::IllegalMove { .. })
                    ));
                }
            }
        });
    }
}

#[test]
fn test_empty_cells_stay_contiguous_in_each_row() {
    for _ in 0..50 {
        random_game(|state| {
            for row in state.board().rows() {
                let first = row.iter().position(|c| c.is_empty());
                let last = row.iter().rposition(|c| c.is_empty());
                if let (Some(first), Some(last)) = (first, last) {
                    assert!(row[first..=last].iter().all(|c| c.is_empty()));
                }
            }
        });
    }
}

#[test]
fn test_turns_alternate() {
    for _ in 0..50 {
        random_game(|state| {
            let x = count(state.board(), Player::X);
            let o = count(state.board(), Player::O);
            assert!(x == o || x == o + 1, "x={} o={}", x, o);
            if !state.status().is_terminal() {
                let expected = if x == o { Player::X } else { Player::O };
                assert_eq!(state.current_player(), expected);
            }
        });
    }
}

#[test]
fn test_random_games_end_consistently() {
    for _ in 0..100 {
        let end = random_game(|_| {});
        match end.status() {
            GameStatus::Won(winner) => {
                assert_eq!(end.current_player(), winner);
                assert!(has_four_in_row(end.board(), winner));
            }
            GameStatus::Draw => {
                assert!(is_draw(end.board()));
                assert_eq!(check_winner(end.board()), None);
            }
            GameStatus::InProgress => panic!("random game did not finish"),
        }
    }
}

#[test]
fn test_stalemate_board_is_draw() {
    let board = stalemate_board();
    assert!(is_full(&board));
    assert_eq!(check_winner(&board), None);
    assert!(is_draw(&board));
    assert!(!is_draw(&board.with_cell(6, 6, Cell::Empty)));
}

#[test]
fn test_last_cell_draws() {
    let board = stalemate_board().with_cell(6, 6, Cell::Empty);
    let state = GameState::from_parts(board, Player::O, GameStatus::InProgress);
    let state = state.apply_move(Move::right(6)).unwrap();
    assert_eq!(state.status(), GameStatus::Draw);
    assert_eq!(state.status().winner(), None);
    assert_eq!(state.current_player(), Player::O);
}

#[test]
fn test_full_board_with_line_is_win_not_draw() {
    // The last cell completes a vertical X line in column 6.
    let board = stalemate_board()
        .with_cell(3, 6, Cell::Occupied(Player::X))
        .with_cell(4, 6, Cell::Occupied(Player::X))
        .with_cell(5, 6, Cell::Occupied(Player::X))
        .with_cell(6, 6, Cell::Empty);
    let state = GameState::from_parts(board, Player::X, GameStatus::InProgress);
    let state = state.apply_move(Move::right(6)).unwrap();
    assert_eq!(state.board().empty_count(), 0);
    assert_eq!(state.status(), GameStatus::Won(Player::X));
}
