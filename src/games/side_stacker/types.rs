//! Core domain types for side-stacker.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
///
/// `X` is the first player (P1), `O` the second (P2).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum Player {
    /// Player X (goes first).
    #[serde(rename = "x")]
    #[strum(serialize = "x")]
    X,
    /// Player O (goes second).
    #[serde(rename = "o")]
    #[strum(serialize = "o")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the surface label ("x" or "o").
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// A cell on the board.
///
/// Serialized as the owning player's mark, or `null` when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns true if no player occupies this cell.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Option<Player>> for Cell {
    fn from(value: Option<Player>) -> Self {
        match value {
            Some(player) => Cell::Occupied(player),
            None => Cell::Empty,
        }
    }
}

impl From<Cell> for Option<Player> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Occupied(player) => Some(player),
            Cell::Empty => None,
        }
    }
}

/// The open end of a row a piece is pushed in from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum Side {
    /// Insert at the lowest-index empty cell.
    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Left,
    /// Insert at the highest-index empty cell.
    #[serde(rename = "R")]
    #[strum(serialize = "R")]
    Right,
}

/// A move: push a piece into `row` from `side`.
///
/// The column is not part of the move; it is resolved against the board
/// when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row index, `0..BOARD_SIZE`.
    pub row: usize,
    /// Side the piece enters from.
    pub side: Side,
}

impl Move {
    /// Creates a new move.
    pub fn new(row: usize, side: Side) -> Self {
        Self { row, side }
    }

    /// Shorthand for a left insertion.
    pub fn left(row: usize) -> Self {
        Self::new(row, Side::Left)
    }

    /// Shorthand for a right insertion.
    pub fn right(row: usize) -> Self {
        Self::new(row, Side::Right)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side: &'static str = self.side.into();
        write!(f, "row {} from {}", self.row, side)
    }
}

/// Current status of the game.
///
/// The winner lives inside `Won`, so a won game always has one and no
/// other status can carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has been won or drawn.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Returns the wire/storage label for this status.
    pub fn label(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won(_) => "won",
            GameStatus::Draw => "draw",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Who drives each side of the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum GameMode {
    /// Two humans sharing one client.
    #[serde(rename = "local")]
    #[strum(serialize = "local")]
    Local,
    /// Two humans on separate clients.
    #[serde(rename = "remote")]
    #[strum(serialize = "remote")]
    Remote,
    /// Human X against AI O.
    #[serde(rename = "ai")]
    #[strum(serialize = "ai")]
    SingleAi,
    /// AI against AI.
    #[serde(rename = "ai-vs-ai")]
    #[strum(serialize = "ai-vs-ai")]
    DualAi,
}

impl GameMode {
    /// Returns true if `player` is driven by the AI in this mode.
    #[instrument]
    pub fn is_ai_controlled(self, player: Player) -> bool {
        match self {
            GameMode::Local | GameMode::Remote => false,
            GameMode::SingleAi => player == Player::O,
            GameMode::DualAi => true,
        }
    }
}

/// AI strength for one player slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum AiDifficulty {
    /// Uniformly random legal move.
    #[default]
    #[serde(rename = "easy")]
    #[strum(serialize = "easy")]
    Easy,
    /// Depth-2 minimax over a line-counting heuristic.
    #[serde(rename = "medium")]
    #[strum(serialize = "medium")]
    Medium,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn test_cell_serializes_as_mark_or_null() {
        let json = serde_json::to_string(&[Cell::Occupied(Player::X), Cell::Empty]).unwrap();
        assert_eq!(json, r#"["x",null]"#);
        let cells: Vec<Cell> = serde_json::from_str(r#"["o",null]"#).unwrap();
        assert_eq!(cells, vec![Cell::Occupied(Player::O), Cell::Empty]);
    }

    #[test]
    fn test_side_tokens() {
        assert_eq!(Side::from_str("L").unwrap(), Side::Left);
        assert_eq!(Side::from_str("R").unwrap(), Side::Right);
        assert!(Side::from_str("U").is_err());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::from_str("ai-vs-ai").unwrap(), GameMode::DualAi);
        let label: &'static str = GameMode::SingleAi.into();
        assert_eq!(label, "ai");
    }

    #[test]
    fn test_ai_control_by_mode() {
        assert!(!GameMode::Local.is_ai_controlled(Player::X));
        assert!(!GameMode::Remote.is_ai_controlled(Player::O));
        assert!(!GameMode::SingleAi.is_ai_controlled(Player::X));
        assert!(GameMode::SingleAi.is_ai_controlled(Player::O));
        assert!(GameMode::DualAi.is_ai_controlled(Player::X));
        assert!(GameMode::DualAi.is_ai_controlled(Player::O));
    }

    #[test]
    fn test_status_winner_only_when_won() {
        assert_eq!(GameStatus::Won(Player::O).winner(), Some(Player::O));
        assert_eq!(GameStatus::Draw.winner(), None);
        assert_eq!(GameStatus::InProgress.winner(), None);
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
    }
}
