//! Draw detection logic for side-stacker.

use super::super::Board;
use tracing::instrument;

/// Checks if the board is full (no empty cells remain).
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.empty_count() == 0
}

/// Checks whether the board is drawn.
///
/// This only looks at occupancy. A full board that also holds a
/// four-in-a-row is a win, so callers check
/// [`has_four_in_row`](super::has_four_in_row) first.
#[instrument(level = "trace", skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}

#[cfg(test)]
mod tests {
    use super::super::super::{BOARD_SIZE, Cell, Move, Player};
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::new().apply(Move::left(3), Player::X).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board_is_draw_by_occupancy() {
        let board = (0..BOARD_SIZE * BOARD_SIZE).fold(Board::new(), |b, i| {
            b.with_cell(i / BOARD_SIZE, i % BOARD_SIZE, Cell::Occupied(Player::O))
        });
        assert!(is_full(&board));
        assert!(is_draw(&board));
        assert!(!is_draw(&board.with_cell(0, 0, Cell::Empty)));
    }
}
