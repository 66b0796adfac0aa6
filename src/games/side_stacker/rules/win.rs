//! Line detection for side-stacker.

use super::super::{BOARD_SIZE, Board, Cell, Player};
use tracing::instrument;

/// Length of a winning line.
pub const WIN_LENGTH: usize = 4;

/// Scan directions as `(row step, col step)`: horizontal, vertical,
/// down-right diagonal, up-right diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Returns true if `len` cells starting at `(row, col)` and stepping by
/// `(dr, dc)` are all in bounds and owned by `player`.
fn run_at(
    board: &Board,
    player: Player,
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
    len: usize,
) -> bool {
    (0..len as isize).all(|i| {
        let r = row as isize + dr * i;
        let c = col as isize + dc * i;
        r >= 0
            && c >= 0
            && board.get(r as usize, c as usize) == Some(Cell::Occupied(player))
    })
}

/// Counts runs of exactly `len` consecutive `player` cells.
///
/// Every start cell and direction is checked independently, so
/// overlapping runs are all counted: a line of three contains two runs
/// of two.
#[instrument(level = "trace", skip(board))]
pub fn count_runs(board: &Board, player: Player, len: usize) -> usize {
    let mut count = 0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            for dir in DIRECTIONS {
                if run_at(board, player, row, col, dir, len) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Checks whether `player` has four in a row in any direction.
#[instrument(level = "trace", skip(board))]
pub fn has_four_in_row(board: &Board, player: Player) -> bool {
    (0..BOARD_SIZE).any(|row| {
        (0..BOARD_SIZE).any(|col| {
            DIRECTIONS
                .iter()
                .any(|&dir| run_at(board, player, row, col, dir, WIN_LENGTH))
        })
    })
}

/// Returns the player with four in a row, checking X first.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_four_in_row(board, player))
}
