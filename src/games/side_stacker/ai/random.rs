//! Uniform random move selection.

use rand::seq::SliceRandom;

use super::MoveStrategy;
use crate::error::GameError;
use crate::games::side_stacker::{Board, Move, Player};

/// Picks a uniformly random legal move.
///
/// Both insertions into a one-gap row stay in the candidate list, so such
/// rows are twice as likely to be picked as their single cell suggests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl MoveStrategy for RandomStrategy {
    fn choose_move(&self, board: &Board, _player: Player) -> Result<Move, GameError> {
        let moves = board.legal_moves();
        let mut rng = rand::thread_rng();
        moves.choose(&mut rng).copied().ok_or(GameError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::side_stacker::{BOARD_SIZE, Cell};
    use std::collections::HashSet;

    #[test]
    fn test_selects_legal_move() {
        let board = Board::new()
            .apply(Move::left(0), Player::X)
            .unwrap()
            .apply(Move::right(4), Player::O)
            .unwrap();
        let legal = board.legal_moves();
        for _ in 0..100 {
            let mv = RandomStrategy.choose_move(&board, Player::X).unwrap();
            assert!(legal.contains(&mv), "{} is not legal", mv);
        }
    }

    #[test]
    fn test_covers_all_moves() {
        let board = Board::new();
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.insert(RandomStrategy.choose_move(&board, Player::O).unwrap());
        }
        assert_eq!(seen.len(), board.legal_moves().len());
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                board = board.with_cell(row, col, Cell::Occupied(Player::X));
            }
        }
        assert!(matches!(
            RandomStrategy.choose_move(&board, Player::O),
            Err(GameError::NoLegalMoves)
        ));
    }
}
