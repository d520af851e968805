//! Routes for the planet catalogue.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use lifeindex_core::model::{ExplorationLog, Planet};
use lifeindex_exploration::application::command_handlers;
use lifeindex_exploration::application::query_handlers::{self, PlanetSummaryView};
use lifeindex_exploration::domain::commands;

use crate::error::ApiError;
use crate::routes::SessionId;
use crate::state::AppState;

/// Request body for POST /scan.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// How many planets to request.
    pub count: usize,
}

/// Response body for POST /scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// Number of planets added.
    pub generated: usize,
    /// The planets added.
    pub planets: Vec<Planet>,
    /// Whether the catalogue reached durable storage.
    pub persisted: bool,
}

/// Response body for commands that change one planet.
#[derive(Debug, Serialize)]
pub struct PlanetChangeResponse {
    /// The planet after (or, for deletion, before) the change.
    pub planet: Planet,
    /// Whether the catalogue reached durable storage.
    pub persisted: bool,
}

/// GET /
#[instrument(skip(state))]
async fn list_planets(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<Vec<PlanetSummaryView>>, ApiError> {
    let planets = query_handlers::list_planets(session_id, &state.sessions, &state.collection)?;
    Ok(Json(planets))
}

/// POST /scan
#[instrument(skip(state, request), fields(count = request.count))]
async fn scan_planets(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let command = commands::ScanPlanets {
        correlation_id: Uuid::new_v4(),
        session_id,
        count: request.count,
    };

    let change = command_handlers::handle_scan_planets(
        &command,
        &state.sessions,
        &*state.provider,
        &state.collection,
    )
    .await?;

    Ok(Json(ScanResponse {
        generated: change.value.len(),
        planets: change.value,
        persisted: change.persisted,
    }))
}

/// GET /{planet_id}
#[instrument(skip(state))]
async fn get_planet(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(planet_id): Path<String>,
) -> Result<Json<Planet>, ApiError> {
    let planet =
        query_handlers::get_planet(session_id, &planet_id, &state.sessions, &state.collection)?;
    Ok(Json(planet))
}

/// POST /{planet_id}/visibility
#[instrument(skip(state))]
async fn toggle_visibility(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(planet_id): Path<String>,
) -> Result<Json<PlanetChangeResponse>, ApiError> {
    let command = commands::ToggleVisibility {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id,
    };

    let change =
        command_handlers::handle_toggle_visibility(&command, &state.sessions, &state.collection)
            .await?;

    Ok(Json(PlanetChangeResponse {
        planet: change.value,
        persisted: change.persisted,
    }))
}

/// DELETE /{planet_id}
#[instrument(skip(state))]
async fn delete_planet(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(planet_id): Path<String>,
) -> Result<Json<PlanetChangeResponse>, ApiError> {
    let command = commands::DeletePlanet {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id,
    };

    let change =
        command_handlers::handle_delete_planet(&command, &state.sessions, &state.collection)
            .await?;

    Ok(Json(PlanetChangeResponse {
        planet: change.value,
        persisted: change.persisted,
    }))
}

/// GET /{planet_id}/logs
#[instrument(skip(state))]
async fn planet_logs(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(planet_id): Path<String>,
) -> Result<Json<Vec<ExplorationLog>>, ApiError> {
    let logs = query_handlers::planet_logs(
        session_id,
        &planet_id,
        &state.sessions,
        &state.collection,
        &*state.log_repository,
    )
    .await?;
    Ok(Json(logs))
}

/// Returns the planet catalogue router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_planets))
        .route("/scan", post(scan_planets))
        .route("/{planet_id}", get(get_planet).delete(delete_planet))
        .route("/{planet_id}/visibility", post(toggle_visibility))
        .route("/{planet_id}/logs", get(planet_logs))
}
