//! Shared fixtures for integration tests.

use side_stacker::{BOARD_SIZE, Board, Cell, Player};

/// Full board with no four-in-a-row for either player.
///
/// Pairs alternate along each row and every row is shifted by one, so
/// (6, 6) belongs to O.
pub fn stalemate_board() -> Board {
    let mut board = Board::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let player = if (col / 2 + row) % 2 == 0 {
                Player::X
            } else {
                Player::O
            };
            board = board.with_cell(row, col, Cell::Occupied(player));
        }
    }
    board
}
