//! Routes for exploration logs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use lifeindex_core::model::ExplorationLog;
use lifeindex_exploration::application::{command_handlers, query_handlers};
use lifeindex_exploration::domain::commands;

use crate::error::ApiError;
use crate::routes::SessionId;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct WriteLogRequest {
    /// The planet the log is about.
    pub planet_id: String,
    /// The log body.
    pub content: String,
}

/// GET /
#[instrument(skip(state))]
async fn list_logs(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<Vec<ExplorationLog>>, ApiError> {
    let logs =
        query_handlers::list_logs(session_id, &state.sessions, &*state.log_repository).await?;
    Ok(Json(logs))
}

/// POST /
#[instrument(skip(state, request), fields(planet_id = %request.planet_id))]
async fn write_log(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(request): Json<WriteLogRequest>,
) -> Result<(StatusCode, Json<ExplorationLog>), ApiError> {
    let command = commands::WriteLog {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id: request.planet_id,
        content: request.content,
    };

    // Log writes are load-modify-save; one at a time.
    let _guard = state.log_writes.lock().await;
    let log = command_handlers::handle_write_log(
        &command,
        &state.sessions,
        state.clock.as_ref(),
        &state.collection,
        &*state.log_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// DELETE /{log_id}
#[instrument(skip(state))]
async fn delete_log(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(log_id): Path<String>,
) -> Result<Json<ExplorationLog>, ApiError> {
    let command = commands::DeleteLog {
        correlation_id: Uuid::new_v4(),
        session_id,
        log_id,
    };

    let _guard = state.log_writes.lock().await;
    let removed =
        command_handlers::handle_delete_log(&command, &state.sessions, &*state.log_repository)
            .await?;

    Ok(Json(removed))
}

/// Returns the exploration log router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs).post(write_log))
        .route("/{log_id}", delete(delete_log))
}
