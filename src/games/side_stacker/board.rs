//! Side-stacker board: a fixed square grid filled from the row ends.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::types::{Cell, Move, Player, Side};
use crate::error::GameError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 7;

/// 7x7 side-stacker board.
///
/// `Board` is a plain `Copy` value. [`Board::apply`] returns a new board and
/// never edits the receiver, so a board held by one caller cannot change
/// underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order, `cells[row][col]`.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Builds a board from explicit rows.
    pub fn from_rows(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns a copy of this board with `(row, col)` set to `cell`.
    ///
    /// This bypasses the insertion rules and is meant for building
    /// fixtures. Out-of-bounds coordinates return the board unchanged.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut next = *self;
        if let Some(slot) = next.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
        next
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Number of empty cells left.
    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_empty())
            .count()
    }

    /// Column a piece pushed into `row` from `side` would land in.
    ///
    /// Left insertions take the lowest-index empty cell, right insertions
    /// the highest-index one. Returns `None` when the row is full or out
    /// of range.
    pub fn target_column(&self, row: usize, side: Side) -> Option<usize> {
        let cells = self.cells.get(row)?;
        match side {
            Side::Left => cells.iter().position(|c| c.is_empty()),
            Side::Right => cells.iter().rposition(|c| c.is_empty()),
        }
    }

    /// Enumerates every legal move.
    ///
    /// Rows are visited in order and each row with room yields a `Left`
    /// move followed by a `Right` move. A row with a single empty cell
    /// still yields both; they resolve to the same cell.
    #[instrument(level = "trace", skip(self))]
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..BOARD_SIZE)
            .filter(|&row| self.cells[row].iter().any(|c| c.is_empty()))
            .flat_map(|row| [Move::left(row), Move::right(row)])
            .collect()
    }

    /// Pushes `player`'s piece in according to `mv`, returning the new board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalMove`] if the row is out of range or
    /// has no empty cell.
    #[instrument(level = "trace", skip_all, fields(row = mv.row, side = ?mv.side, player = %player))]
    pub fn apply(&self, mv: Move, player: Player) -> Result<Board, GameError> {
        if mv.row >= BOARD_SIZE {
            return Err(GameError::illegal(format!(
                "row {} is out of range (0-{})",
                mv.row,
                BOARD_SIZE - 1
            )));
        }

        let col = self
            .target_column(mv.row, mv.side)
            .ok_or_else(|| GameError::illegal(format!("row {} is full", mv.row)))?;

        let mut next = *self;
        next.cells[mv.row][col] = Cell::Occupied(player);
        Ok(next)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::from("  ");
        for col in 0..BOARD_SIZE {
            result.push_str(&format!(" {}", col));
        }
        for (row, cells) in self.cells.iter().enumerate() {
            result.push('\n');
            result.push_str(&format!("{} ", row));
            for cell in cells {
                let symbol = match cell {
                    Cell::Empty => "_",
                    Cell::Occupied(Player::X) => "X",
                    Cell::Occupied(Player::O) => "O",
                };
                result.push(' ');
                result.push_str(symbol);
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.empty_count(), BOARD_SIZE * BOARD_SIZE);
        assert_eq!(board.get(3, 3), Some(Cell::Empty));
        assert_eq!(board.get(BOARD_SIZE, 0), None);
    }

    #[test]
    fn test_legal_moves_empty_board_order() {
        let moves = Board::new().legal_moves();
        assert_eq!(moves.len(), 2 * BOARD_SIZE);
        assert_eq!(moves[0], Move::left(0));
        assert_eq!(moves[1], Move::right(0));
        assert_eq!(moves[13], Move::right(6));
    }

    #[test]
    fn test_left_fills_from_left() {
        let board = Board::new().apply(Move::left(0), Player::X).unwrap();
        assert_eq!(board.get(0, 0), Some(Cell::Occupied(Player::X)));
        assert_eq!(board.empty_count(), BOARD_SIZE * BOARD_SIZE - 1);
    }

    #[test]
    fn test_right_stacks_inward() {
        let board = Board::new()
            .apply(Move::right(0), Player::X)
            .unwrap()
            .apply(Move::right(0), Player::O)
            .unwrap();
        assert_eq!(board.get(0, 6), Some(Cell::Occupied(Player::X)));
        assert_eq!(board.get(0, 5), Some(Cell::Occupied(Player::O)));
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let board = Board::new();
        let next = board.apply(Move::left(2), Player::O).unwrap();
        assert_eq!(board, Board::new());
        assert_ne!(board, next);
    }

    #[test]
    fn test_single_gap_yields_both_sides() {
        let mut board = Board::new();
        for col in 0..BOARD_SIZE {
            if col != 4 {
                board = board.with_cell(1, col, Cell::Occupied(Player::X));
            }
        }
        let row_moves: Vec<_> = board
            .legal_moves()
            .into_iter()
            .filter(|m| m.row == 1)
            .collect();
        assert_eq!(row_moves, vec![Move::left(1), Move::right(1)]);
        assert_eq!(board.target_column(1, Side::Left), Some(4));
        assert_eq!(board.target_column(1, Side::Right), Some(4));
    }

    #[test]
    fn test_full_row_rejected() {
        let mut board = Board::new();
        for _ in 0..BOARD_SIZE {
            board = board.apply(Move::left(3), Player::X).unwrap();
        }
        assert!(board.legal_moves().iter().all(|m| m.row != 3));
        assert!(matches!(
            board.apply(Move::right(3), Player::O),
            Err(GameError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_out_of_range_row_rejected() {
        let result = Board::new().apply(Move::left(BOARD_SIZE), Player::X);
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
    }

    #[test]
    fn test_board_serializes_as_matrix() {
        let board = Board::new().apply(Move::left(0), Player::X).unwrap();
        let value = serde_json::to_value(board).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert_eq!(rows[0][0], serde_json::json!("x"));
        assert_eq!(rows[0][1], serde_json::Value::Null);
        let back: Board = serde_json::from_value(value).unwrap();
        assert_eq!(back, board);
    }
}
