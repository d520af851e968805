//! Routes for sector navigation, discovery points and encounters.
//!
//! Mounted under the planet prefix, so every path starts at
//! `/{planet_id}/sectors/{index}`.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use lifeindex_core::model::{DiscoveryPoint, Encounter, EncounterStep};
use lifeindex_exploration::application::command_handlers;
use lifeindex_exploration::application::query_handlers::{self, SectorView};
use lifeindex_exploration::domain::commands;

use crate::error::ApiError;
use crate::routes::SessionId;
use crate::state::AppState;

/// Response body for POST /{planet_id}/sectors/{index}/visit.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    /// The sector as it stands after the visit.
    #[serde(flatten)]
    pub view: SectorView,
    /// The trigger decision for this sector in this session.
    pub triggered: bool,
    /// Whether this visit attached a new encounter.
    pub encounter_spawned: bool,
    /// Durable write outcome, present only when an encounter was attached.
    pub persisted: Option<bool>,
}

/// Response body for POST /{planet_id}/sectors/{index}/discoveries/{point_id}.
#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    /// The examined point.
    pub point: DiscoveryPoint,
    /// `false` when this session had examined the point before.
    pub first_time: bool,
}

/// Request body for POST /{planet_id}/sectors/{index}/encounter/choices.
#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    /// Index into the current step's choices.
    pub choice_index: usize,
}

/// Response body for POST /{planet_id}/sectors/{index}/encounter/choices.
#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    /// The encounter after the choice.
    pub encounter: Encounter,
    /// The step now on display; `None` once the encounter is complete.
    pub current_step: Option<EncounterStep>,
    /// Whether the change reached durable storage.
    pub persisted: bool,
}

/// GET /{planet_id}/sectors/{index}
#[instrument(skip(state))]
async fn get_sector(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path((planet_id, sector_index)): Path<(String, usize)>,
) -> Result<Json<SectorView>, ApiError> {
    let view = query_handlers::get_sector(
        session_id,
        &planet_id,
        sector_index,
        &state.sessions,
        &state.collection,
    )?;
    Ok(Json(view))
}

/// POST /{planet_id}/sectors/{index}/visit
#[instrument(skip(state))]
async fn visit_sector(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path((planet_id, sector_index)): Path<(String, usize)>,
) -> Result<Json<VisitResponse>, ApiError> {
    let command = commands::VisitSector {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id,
        sector_index,
    };

    let visit = command_handlers::handle_visit_sector(
        &command,
        &state.sessions,
        &state.rng,
        &*state.provider,
        &state.collection,
    )
    .await?;

    Ok(Json(VisitResponse {
        triggered: visit.decision.should_trigger(),
        encounter_spawned: visit.encounter_spawned,
        persisted: visit.persisted,
        view: visit.view,
    }))
}

/// POST /{planet_id}/sectors/{index}/discoveries/{point_id}
#[instrument(skip(state))]
async fn examine_discovery_point(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path((planet_id, sector_index, point_id)): Path<(String, usize, String)>,
) -> Result<Json<DiscoveryResponse>, ApiError> {
    let command = commands::ExamineDiscoveryPoint {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id,
        sector_index,
        point_id,
    };

    let discovery = command_handlers::handle_examine_discovery_point(
        &command,
        &state.sessions,
        &state.collection,
    )?;

    Ok(Json(DiscoveryResponse {
        point: discovery.point,
        first_time: discovery.first_time,
    }))
}

/// POST /{planet_id}/sectors/{index}/encounter/choices
#[instrument(skip(state, request), fields(choice_index = request.choice_index))]
async fn submit_choice(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path((planet_id, sector_index)): Path<(String, usize)>,
    Json(request): Json<ChoiceRequest>,
) -> Result<Json<ChoiceResponse>, ApiError> {
    let command = commands::SubmitChoice {
        correlation_id: Uuid::new_v4(),
        session_id,
        planet_id,
        sector_index,
        choice_index: request.choice_index,
    };

    let change =
        command_handlers::handle_submit_choice(&command, &state.sessions, &state.collection)
            .await?;

    let current_step = if change.value.is_completed {
        None
    } else {
        change.value.current_step().cloned()
    };
    Ok(Json(ChoiceResponse {
        current_step,
        encounter: change.value,
        persisted: change.persisted,
    }))
}

/// Returns the sector router, to be merged into the planet router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{planet_id}/sectors/{index}", get(get_sector))
        .route("/{planet_id}/sectors/{index}/visit", post(visit_sector))
        .route(
            "/{planet_id}/sectors/{index}/discoveries/{point_id}",
            post(examine_discovery_point),
        )
        .route(
            "/{planet_id}/sectors/{index}/encounter/choices",
            post(submit_choice),
        )
}
