//! HTTP route handlers.
//!
//! CRUD over games and bets plus the two report endpoints. State is
//! shared via `Arc<ServerState>`. Every error is surfaced as a JSON
//! `{error}` body; report/renderer failures become 500s and never crash
//! the process.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::report::{self, pdf, word};
use crate::store::{GameRequest, PlaceBetRequest, PoolStore, UpdateBetRequest};
use crate::types::{Bet, Game, PoolError};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ServerState {
    pub store: PoolStore,
    pub config: AppConfig,
}

impl ServerState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: PoolStore::new(),
            config,
        }
    }
}

pub type AppState = Arc<ServerState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Boundary error: maps domain errors onto status codes and a JSON
/// `{error}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        let status = match &err {
            PoolError::GameNotFound(_) | PoolError::BetNotFound(_) => StatusCode::NOT_FOUND,
            PoolError::InvalidRequest(_) | PoolError::GameClosed(_) => StatusCode::BAD_REQUEST,
            PoolError::MalformedBet { .. } | PoolError::MalformedGame { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Game handlers
// ---------------------------------------------------------------------------

/// GET /api/games
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.store.list_games().await)
}

/// POST /api/games
pub async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<GameRequest>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let game = state.store.create_game(req).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    Ok(Json(state.store.get_game(&id).await?))
}

/// PUT /api/games/:id
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<GameRequest>,
) -> Result<Json<Game>, ApiError> {
    Ok(Json(state.store.update_game(&id, req).await?))
}

/// DELETE /api/games/:id
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_game(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bet handlers
// ---------------------------------------------------------------------------

/// GET /api/bets
pub async fn list_bets(State(state): State<AppState>) -> Json<Vec<Bet>> {
    Json(state.store.list_bets().await)
}

/// POST /api/bets
pub async fn place_bet(
    State(state): State<AppState>,
    Json(req): Json<PlaceBetRequest>,
) -> Result<(StatusCode, Json<Bet>), ApiError> {
    let bet = state.store.place_bet(req).await?;
    Ok((StatusCode::CREATED, Json(bet)))
}

/// GET /api/bets/:id
pub async fn get_bet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bet>, ApiError> {
    Ok(Json(state.store.get_bet(&id).await?))
}

/// PUT /api/bets/:id — settle a bet (status is the only mutable field).
pub async fn update_bet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBetRequest>,
) -> Result<Json<Bet>, ApiError> {
    Ok(Json(state.store.update_bet(&id, req).await?))
}

/// DELETE /api/bets/:id
pub async fn delete_bet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_bet(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Report handlers
// ---------------------------------------------------------------------------

/// Optional request body for the report endpoints. When either list is
/// non-empty it replaces the store snapshot — offline/test generation.
/// Otherwise the current store state is the canonical input.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportRequest {
    pub bets: Vec<Bet>,
    pub games: Vec<Game>,
}

/// POST /generate-pdf-report
pub async fn generate_pdf_report(
    State(state): State<AppState>,
    body: Option<Json<ReportRequest>>,
) -> Result<Response, ApiError> {
    let (games, bets) = report_input(&state, body).await;
    let model = report::build_report_model(&games, &bets, &state.config.report)?;
    let bytes = pdf::render(&model, state.config.report.pdf_view)?;
    info!(bets = bets.len(), bytes = bytes.len(), "PDF report generated");
    Ok(download("pdf", "application/pdf", bytes))
}

/// POST /generate-word-report
pub async fn generate_word_report(
    State(state): State<AppState>,
    body: Option<Json<ReportRequest>>,
) -> Result<Response, ApiError> {
    let (games, bets) = report_input(&state, body).await;
    let model = report::build_report_model(&games, &bets, &state.config.report)?;
    let bytes = word::render(&model, state.config.report.word_view)?;
    info!(bets = bets.len(), bytes = bytes.len(), "Word report generated");
    Ok(download(
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        bytes,
    ))
}

async fn report_input(
    state: &AppState,
    body: Option<Json<ReportRequest>>,
) -> (Vec<Game>, Vec<Bet>) {
    match body {
        Some(Json(req)) if !req.bets.is_empty() || !req.games.is_empty() => {
            (req.games, req.bets)
        }
        _ => state.store.snapshot().await,
    }
}

fn download(ext: &str, mime: &str, bytes: Vec<u8>) -> Response {
    let filename = format!("report_{}.{ext}", Utc::now().format("%Y%m%d_%H%M"));
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
