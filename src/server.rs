//! REST transport for the game service.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{error, info, instrument};

use crate::error::GameError;
use crate::games::side_stacker::{AiDifficulty, Board, GameMode, Move, Player, Side};
use crate::service::GameService;
use crate::store::GameRecord;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    service: Arc<GameService>,
}

/// A game as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Game id.
    pub id: String,
    /// 7x7 matrix of `"x"`, `"o"` or `null`.
    pub board: Board,
    /// Player to move, or the last mover once finished.
    pub current_player: Player,
    /// `"in_progress"`, `"won"` or `"draw"`.
    pub status: String,
    /// Winner of a won game.
    pub winner: Option<Player>,
    /// Game mode.
    pub game_mode: GameMode,
    /// Difficulty for X.
    pub ai_difficulty1: Option<AiDifficulty>,
    /// Difficulty for O.
    pub ai_difficulty2: Option<AiDifficulty>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: DateTime<Utc>,
    /// Last accepted move.
    pub last_move_at: DateTime<Utc>,
}

impl From<GameRecord> for GameView {
    fn from(record: GameRecord) -> Self {
        Self {
            status: record.status().label().to_string(),
            winner: record.winner(),
            current_player: *record.current_player(),
            board: *record.board(),
            game_mode: *record.mode(),
            ai_difficulty1: *record.ai_difficulty_x(),
            ai_difficulty2: *record.ai_difficulty_o(),
            created_at: *record.created_at(),
            updated_at: *record.updated_at(),
            last_move_at: *record.last_move_at(),
            id: record.id().clone(),
        }
    }
}

/// Body of `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// Game mode.
    pub game_mode: GameMode,
    /// Difficulty for X.
    #[serde(default)]
    pub ai1_difficulty: Option<AiDifficulty>,
    /// Difficulty for O.
    #[serde(default)]
    pub ai2_difficulty: Option<AiDifficulty>,
}

/// Body of `POST /games/{id}/move`.
///
/// Fields are raw JSON so that a bad row or side is reported as an illegal
/// move, and only after the game itself has been checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row index.
    #[serde(default)]
    pub row: serde_json::Value,
    /// `"L"` or `"R"`.
    #[serde(default)]
    pub side: serde_json::Value,
}

impl TryFrom<MoveRequest> for Move {
    type Error = GameError;

    fn try_from(req: MoveRequest) -> Result<Self, Self::Error> {
        let row = req
            .row
            .as_u64()
            .and_then(|r| usize::try_from(r).ok())
            .ok_or_else(|| GameError::illegal(format!("row {} is not a row index", req.row)))?;
        let side = req
            .side
            .as_str()
            .and_then(|s| Side::from_str(s).ok())
            .ok_or_else(|| {
                GameError::illegal(format!("side {} must be \"L\" or \"R\"", req.side))
            })?;
        Ok(Move::new(row, side))
    }
}

/// Error response: a status code and `{ "error": message }`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match &err {
            GameError::NotFound { .. } => StatusCode::NOT_FOUND,
            GameError::IllegalMove { .. } => StatusCode::BAD_REQUEST,
            GameError::InvalidState { .. } => StatusCode::CONFLICT,
            GameError::NoLegalMoves => StatusCode::INTERNAL_SERVER_ERROR,
            GameError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        }
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Runs a service call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Worker failed: {}", e),
        }),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let service = state.service.clone();
    let record = blocking(move || {
        service.start_game(req.game_mode, req.ai1_difficulty, req.ai2_difficulty)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let service = state.service.clone();
    let record = blocking(move || service.get_game(&id)).await?;
    Ok(Json(record.into()))
}

#[instrument(skip(state))]
async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameView>, ApiError> {
    let service = state.service.clone();
    let record = blocking(move || service.submit_move(&id, req)).await?;
    Ok(Json(record.into()))
}

/// Builds the application router.
pub fn router(service: Arc<GameService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(health))
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/join", get(get_game))
        .route("/games/{id}/move", post(make_move))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Serves the router on `addr` until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(service))]
pub async fn serve(addr: &str, service: Arc<GameService>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
