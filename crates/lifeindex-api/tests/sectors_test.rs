//! Integration tests for sector navigation, discovery and encounters.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use lifeindex_test_support::{ScriptedContentProvider, sample_planet};
use serde_json::json;

const VISIT_FIRST: &str = "/api/v1/planets/planet-a/sectors/0/visit";
const VISIT_LAST: &str = "/api/v1/planets/planet-a/sectors/4/visit";
const CHOICES: &str = "/api/v1/planets/planet-a/sectors/0/encounter/choices";

#[tokio::test]
async fn test_get_sector_wraps_navigation_indices() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::get_json(
        &app.router,
        "/api/v1/planets/planet-a/sectors/0",
        session_id,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["next_index"], 1);
    assert_eq!(json["previous_index"], 4);
    assert_eq!(json["encounter_state"], "none");
    assert_eq!(json["sector"]["id"], "planet-a-sector-0");
}

#[tokio::test]
async fn test_low_roll_spawns_and_persists_encounter() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![0.1]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(&app.router, VISIT_FIRST, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["triggered"], true);
    assert_eq!(json["encounter_spawned"], true);
    assert_eq!(json["persisted"], true);
    assert_eq!(json["encounter_state"], "in_progress");
    assert_eq!(json["current_step"]["id"], "start");
    assert_eq!(json["sector"]["encounter"]["entityName"], "Lumen Spores");
    common::wait_for_writes(&app.planets, 1).await;
    assert!(app.planets.stored()[0].sectors[0].encounter.is_some());
}

#[tokio::test]
async fn test_high_roll_is_memoized_for_the_session() {
    // Second draw would trigger, but the pair is never rolled again.
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![0.9, 0.1]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (_, first) = common::post_empty(&app.router, VISIT_FIRST, session_id).await;
    let (status, second) = common::post_empty(&app.router, VISIT_FIRST, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["triggered"], false);
    assert_eq!(second["triggered"], false);
    assert_eq!(second["encounter_spawned"], false);
    assert!(second["persisted"].is_null());
    assert_eq!(app.provider.encounter_requests(), 0);
}

#[tokio::test]
async fn test_new_session_rolls_again() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![0.9, 0.1]);
    let first_session = common::start_session(&app.router, "Vega").await;
    let second_session = common::start_session(&app.router, "Altair").await;

    common::post_empty(&app.router, VISIT_FIRST, first_session).await;
    let (_, json) = common::post_empty(&app.router, VISIT_FIRST, second_session).await;

    assert_eq!(json["encounter_spawned"], true);
    assert_eq!(app.provider.encounter_requests(), 1);
}

#[tokio::test]
async fn test_last_sector_guarantees_an_encounter() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![0.99]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(&app.router, VISIT_LAST, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["triggered"], true);
    assert_eq!(json["encounter_spawned"], true);
}

#[tokio::test]
async fn test_existing_encounter_is_not_rerolled() {
    let app = common::build_test_app(vec![common::planet_with_encounter("planet-a")], vec![0.1]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(&app.router, VISIT_FIRST, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["encounter_spawned"], false);
    assert_eq!(json["encounter_state"], "in_progress");
    assert_eq!(app.provider.encounter_requests(), 0);
}

#[tokio::test]
async fn test_failed_encounter_request_leaves_sector_empty() {
    let provider = Arc::new(ScriptedContentProvider::new(vec![], None));
    let app = common::build_test_app_with_provider(
        vec![sample_planet("planet-a")],
        vec![0.1],
        provider,
    );
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(&app.router, VISIT_FIRST, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["triggered"], true);
    assert_eq!(json["encounter_spawned"], false);
    assert_eq!(json["encounter_state"], "none");
    assert_eq!(app.planets.write_count(), 0);
}

#[tokio::test]
async fn test_out_of_range_sector_is_not_found() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(
        &app.router,
        "/api/v1/planets/planet-a/sectors/9/visit",
        session_id,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "sector_not_found");
}

#[tokio::test]
async fn test_examining_a_point_is_recorded_once_per_session() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;
    let uri = "/api/v1/planets/planet-a/sectors/0/discoveries/dp-planet-a-sector-0-0";

    let (status, first) = common::post_empty(&app.router, uri, session_id).await;
    let (_, second) = common::post_empty(&app.router, uri, session_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["first_time"], true);
    assert_eq!(first["point"]["label"], "Gravity Drift");
    assert_eq!(second["first_time"], false);
    let (_, sector) = common::get_json(
        &app.router,
        "/api/v1/planets/planet-a/sectors/0",
        session_id,
    )
    .await;
    assert_eq!(sector["discovered"], json!(["dp-planet-a-sector-0-0"]));
}

#[tokio::test]
async fn test_unknown_discovery_point_is_rejected() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::post_empty(
        &app.router,
        "/api/v1/planets/planet-a/sectors/0/discoveries/dp-missing",
        session_id,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_choices_walk_the_encounter_to_completion() {
    let app = common::build_test_app(vec![common::planet_with_encounter("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, mid) =
        common::post_json(&app.router, CHOICES, session_id, &json!({ "choice_index": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mid["current_step"]["id"], "mid");
    assert_eq!(mid["encounter"]["history"][0]["response"], "responseA");
    assert_eq!(mid["persisted"], true);

    let (status, done) =
        common::post_json(&app.router, CHOICES, session_id, &json!({ "choice_index": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["encounter"]["isCompleted"], true);
    assert_eq!(done["encounter"]["currentStepId"], "mid");
    assert!(done["current_step"].is_null());

    let (status, json) =
        common::post_json(&app.router, CHOICES, session_id, &json!({ "choice_index": 0 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "invalid_transition");
}

#[tokio::test]
async fn test_choice_out_of_range_changes_nothing() {
    let app = common::build_test_app(vec![common::planet_with_encounter("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, _) =
        common::post_json(&app.router, CHOICES, session_id, &json!({ "choice_index": 7 })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    let (_, planet) = common::get_json(&app.router, "/api/v1/planets/planet-a", session_id).await;
    assert_eq!(planet["sectors"][0]["encounter"]["history"], json!([]));
    assert_eq!(app.planets.write_count(), 0);
}

#[tokio::test]
async fn test_choice_on_sector_without_encounter_is_rejected() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) =
        common::post_json(&app.router, CHOICES, session_id, &json!({ "choice_index": 0 })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "invalid_transition");
}
