//! Row models for the `games` table and their mapping to [`GameRecord`].

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::side_stacker::{AiDifficulty, Board, GameMode, GameStatus, Player};
use crate::store::{GameRecord, GameUpdate, NewGame};

/// A row of the `games` table.
///
/// Enums are stored as their lowercase labels and the board as a JSON
/// matrix of `"x"`, `"o"` and `null`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    id: String,
    board: String,
    current_player: String,
    status: String,
    winner: Option<String>,
    game_mode: String,
    ai_difficulty1: Option<String>,
    ai_difficulty2: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    last_move_at: NaiveDateTime,
}

/// Columns written by an accepted move.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameChanges {
    board: String,
    current_player: String,
    status: String,
    winner: Option<String>,
    updated_at: NaiveDateTime,
    last_move_at: NaiveDateTime,
}

fn label<T: Into<&'static str>>(value: T) -> String {
    let s: &'static str = value.into();
    s.to_string()
}

#[track_caller]
fn parse<T: FromStr>(column: &str, value: &str) -> Result<T, DbError> {
    T::from_str(value).map_err(|_| DbError::corrupt(column, format!("unknown label '{}'", value)))
}

#[track_caller]
fn parse_status(status: &str, winner: Option<&str>) -> Result<GameStatus, DbError> {
    match (status, winner) {
        ("in_progress", None) => Ok(GameStatus::InProgress),
        ("draw", None) => Ok(GameStatus::Draw),
        ("won", Some(w)) => Ok(GameStatus::Won(parse("winner", w)?)),
        _ => Err(DbError::corrupt(
            "status",
            format!("'{}' with winner {:?}", status, winner),
        )),
    }
}

impl TryFrom<&NewGame> for GameRow {
    type Error = DbError;

    #[instrument(skip(game), fields(game_id = %game.id()))]
    fn try_from(game: &NewGame) -> Result<Self, Self::Error> {
        let created_at = game.created_at().naive_utc();
        Ok(Self {
            id: game.id().clone(),
            board: serde_json::to_string(game.board())?,
            current_player: label(*game.current_player()),
            status: game.status().label().to_string(),
            winner: game.status().winner().map(label),
            game_mode: label(*game.mode()),
            ai_difficulty1: game.ai_difficulty_x().map(label),
            ai_difficulty2: game.ai_difficulty_o().map(label),
            created_at,
            updated_at: created_at,
            last_move_at: created_at,
        })
    }
}

impl TryFrom<&GameUpdate> for GameChanges {
    type Error = DbError;

    fn try_from(update: &GameUpdate) -> Result<Self, Self::Error> {
        let moved_at = update.moved_at().naive_utc();
        Ok(Self {
            board: serde_json::to_string(update.board())?,
            current_player: label(*update.current_player()),
            status: update.status().label().to_string(),
            winner: update.status().winner().map(label),
            updated_at: moved_at,
            last_move_at: moved_at,
        })
    }
}

impl TryFrom<GameRow> for GameRecord {
    type Error = DbError;

    #[instrument(skip(row), fields(game_id = %row.id))]
    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let board: Board = serde_json::from_str(&row.board)?;
        let current_player: Player = parse("current_player", &row.current_player)?;
        let status = parse_status(&row.status, row.winner.as_deref())?;
        let mode: GameMode = parse("game_mode", &row.game_mode)?;
        let ai_difficulty_x = row
            .ai_difficulty1
            .as_deref()
            .map(|d| parse::<AiDifficulty>("ai_difficulty1", d))
            .transpose()?;
        let ai_difficulty_o = row
            .ai_difficulty2
            .as_deref()
            .map(|d| parse::<AiDifficulty>("ai_difficulty2", d))
            .transpose()?;

        Ok(GameRecord::new(
            row.id,
            board,
            current_player,
            status,
            mode,
            ai_difficulty_x,
            ai_difficulty_o,
            row.created_at.and_utc(),
            row.updated_at.and_utc(),
            row.last_move_at.and_utc(),
        ))
    }
}
