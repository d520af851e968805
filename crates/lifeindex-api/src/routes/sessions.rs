//! Routes for explorer sessions and the admin gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use lifeindex_exploration::application::command_handlers;
use lifeindex_exploration::domain::commands;
use lifeindex_exploration::domain::session::ExplorerSession;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// The persona name.
    pub nickname: String,
}

/// Request body for POST /{session_id}/admin.
#[derive(Deserialize)]
pub struct LoginAdminRequest {
    /// Admin id.
    pub id: String,
    /// Admin password.
    pub password: String,
}

/// A session as returned to the caller.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Id to send back in the `x-session-id` header.
    pub session_id: Uuid,
    /// The persona name.
    pub nickname: String,
    /// `explorer` or `admin`.
    pub access: &'static str,
}

impl From<ExplorerSession> for SessionResponse {
    fn from(session: ExplorerSession) -> Self {
        Self {
            session_id: session.id,
            nickname: session.nickname,
            access: session.access.as_str(),
        }
    }
}

/// POST /
#[instrument(skip(state, request))]
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
        nickname: request.nickname,
    };

    let session = command_handlers::handle_start_session(&command, &state.sessions)?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::EndSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    command_handlers::handle_end_session(&command, &state.sessions)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{session_id}/admin
#[instrument(skip(state, request))]
async fn login_admin(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<LoginAdminRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let command = commands::LoginAdmin {
        correlation_id: Uuid::new_v4(),
        session_id,
        admin_id: request.id,
        password: request.password,
    };

    let session = command_handlers::handle_login_admin(
        &command,
        state.admin_credentials.as_ref(),
        &state.sessions,
    )?;

    Ok(Json(session.into()))
}

/// DELETE /{session_id}/admin
#[instrument(skip(state))]
async fn logout_admin(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let command = commands::LogoutAdmin {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    let session = command_handlers::handle_logout_admin(&command, &state.sessions)?;

    Ok(Json(session.into()))
}

/// Returns the session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/{session_id}", delete(end_session))
        .route("/{session_id}/admin", post(login_admin).delete(logout_admin))
}
