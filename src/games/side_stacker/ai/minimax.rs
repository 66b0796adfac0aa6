//! Depth-limited minimax over the line-counting heuristic.

use tracing::{debug, instrument};

use super::MoveStrategy;
use super::heuristic::evaluate;
use crate::error::GameError;
use crate::games::side_stacker::rules::has_four_in_row;
use crate::games::side_stacker::{Board, Move, Player};

/// Search depth in plies for the medium AI.
pub const MEDIUM_DEPTH: u32 = 2;

/// Minimax search from the AI player's point of view.
///
/// Maximizing plies place the AI's pieces and minimizing plies place the
/// opponent's. Only the two-ply search is exercised; deeper searches
/// alternate the same way but are not tuned.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxStrategy {
    depth: u32,
}

impl MinimaxStrategy {
    /// Creates a search of the given depth.
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Returns the search depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Scores `board` and returns the best move found at this ply.
    ///
    /// Leaves are reached at depth zero, when either side has a line, or
    /// when the board is full. Ties keep the earliest move in
    /// [`Board::legal_moves`] order.
    fn search(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        ai: Player,
    ) -> (i32, Option<Move>) {
        let moves = board.legal_moves();
        if depth == 0
            || moves.is_empty()
            || has_four_in_row(board, Player::X)
            || has_four_in_row(board, Player::O)
        {
            return (evaluate(board, ai), None);
        }

        let mover = if maximizing { ai } else { ai.opponent() };
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for mv in moves {
            let Ok(child) = board.apply(mv, mover) else {
                continue;
            };
            let (score, _) = self.search(&child, depth - 1, !maximizing, ai);
            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = Some(mv);
            }
        }

        (best_score, best_move)
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(MEDIUM_DEPTH)
    }
}

impl MoveStrategy for MinimaxStrategy {
    #[instrument(skip(self, board), fields(depth = self.depth()))]
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move, GameError> {
        let moves = board.legal_moves();
        let first = *moves.first().ok_or(GameError::NoLegalMoves)?;

        let (score, best) = self.search(board, self.depth(), true, player);
        debug!(score, best = ?best, "Minimax search finished");

        Ok(best.unwrap_or(first))
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
