//! Static board evaluation for the minimax search.

use tracing::instrument;

use crate::games::side_stacker::rules::{count_runs, has_four_in_row};
use crate::games::side_stacker::{Board, Player};

/// Score of a board on which the evaluated player has four in a row.
pub const WIN_SCORE: i32 = 1000;

/// Score of a board on which the opponent has four in a row.
pub const LOSS_SCORE: i32 = -1000;

const OWN_THREE: i32 = 10;
const OWN_TWO: i32 = 3;
const OPP_THREE: i32 = -12;
const OPP_TWO: i32 = -4;

/// Scores `board` from `player`'s point of view.
///
/// A completed line decides the score outright. Otherwise runs of two and
/// three are counted in every direction, overlaps included, and the
/// opponent's runs weigh slightly more than the player's own.
#[instrument(level = "trace", skip(board))]
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();

    if has_four_in_row(board, player) {
        return WIN_SCORE;
    }
    if has_four_in_row(board, opponent) {
        return LOSS_SCORE;
    }

    let runs = |who: Player, len: usize| count_runs(board, who, len) as i32;

    runs(player, 3) * OWN_THREE
        + runs(player, 2) * OWN_TWO
        + runs(opponent, 3) * OPP_THREE
        + runs(opponent, 2) * OPP_TWO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::side_stacker::Cell;

    fn place(board: Board, player: Player, cells: &[(usize, usize)]) -> Board {
        cells
            .iter()
            .fold(board, |b, &(r, c)| b.with_cell(r, c, Cell::Occupied(player)))
    }

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(evaluate(&Board::new(), Player::X), 0);
    }

    #[test]
    fn test_win_and_loss() {
        let board = place(Board::new(), Player::O, &[(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(evaluate(&board, Player::O), WIN_SCORE);
        assert_eq!(evaluate(&board, Player::X), LOSS_SCORE);
    }

    #[test]
    fn test_weighted_runs() {
        // X has one three-run and two two-runs on row 0.
        let board = place(Board::new(), Player::X, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(evaluate(&board, Player::X), 10 + 2 * 3);
        assert_eq!(evaluate(&board, Player::O), -12 - 2 * 4);
    }

    #[test]
    fn test_isolated_pieces_score_nothing() {
        let board = place(Board::new(), Player::X, &[(0, 0), (3, 3)]);
        let board = place(board, Player::O, &[(6, 0)]);
        assert_eq!(evaluate(&board, Player::X), 0);
    }
}
