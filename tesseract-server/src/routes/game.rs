//! Game API endpoints
//!
//! Snapshot, move and reset for the single shared session.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tesseract_core::{BoardError, Coord, Game, GameState, Mark, MoveError};

use crate::state::ServerState;

/// One cell as the visualizer draws it
#[derive(Serialize)]
pub struct CellView {
    #[serde(flatten)]
    pub coord: Coord,
    pub mark: Option<Mark>,
    /// Clickable: empty and the game is still on
    pub playable: bool,
    /// Part of the winning line
    pub winning: bool,
}

/// Everything a renderer needs after any request
#[derive(Serialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub message: String,
    pub turn: Option<Mark>,
    pub move_count: usize,
    pub cells: Vec<CellView>,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        let line = game.winning_line();
        let cells = game
            .board()
            .cells()
            .map(|(coord, mark)| CellView {
                coord,
                mark,
                playable: game.is_playable(coord),
                winning: line.is_some_and(|l| l.contains(coord)),
            })
            .collect();

        Self {
            state: *game.state(),
            message: game.state().to_string(),
            turn: game.turn(),
            move_count: game.move_count(),
            cells,
        }
    }
}

/// Rejected move as an HTTP error
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        let status = match err {
            MoveError::Board(BoardError::OutOfRange { .. }) => StatusCode::BAD_REQUEST,
            MoveError::Board(BoardError::CellOccupied { .. }) | MoveError::GameOver => {
                StatusCode::CONFLICT
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Body that is not a `{x, y, z, w}` object of small non-negative integers
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Current snapshot
pub async fn get_game(State(state): State<Arc<ServerState>>) -> Json<GameSnapshot> {
    Json(state.lock_game(|game| GameSnapshot::from_game(game)))
}

/// Place the current player's mark
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<Coord>, JsonRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Json(coord) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "malformed move request");
        ApiError::from(rejection)
    })?;
    state.lock_game(|game| {
        let applied = game.apply_move(coord).map(|_| ());
        match applied {
            Ok(()) => Ok(Json(GameSnapshot::from_game(game))),
            Err(err) => {
                tracing::debug!(%coord, error = %err, "rejected move request");
                Err(err.into())
            }
        }
    })
}

/// Start over with an empty board
pub async fn reset_game(State(state): State<Arc<ServerState>>) -> Json<GameSnapshot> {
    Json(state.lock_game(|game| {
        game.reset();
        tracing::info!("game reset");
        GameSnapshot::from_game(game)
    }))
}
