//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use lifeindex_core::clock::Clock;
use lifeindex_core::model::Planet;
use lifeindex_core::rng::DeterministicRng;
use lifeindex_exploration::application::collection::PlanetCollection;
use lifeindex_exploration::domain::session::AdminCredentials;
use lifeindex_test_support::{
    FixedClock, InMemoryLogRepository, InMemoryPlanetRepository, ScriptedContentProvider,
    SequenceRng, branching_encounter, sample_planet,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use lifeindex_api::routes::SESSION_HEADER;
use lifeindex_api::state::AppState;

pub const ADMIN_ID: &str = "commander";
pub const ADMIN_PASSWORD: &str = "hunter2";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// The app plus handles on its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub planets: Arc<InMemoryPlanetRepository>,
    pub logs: Arc<InMemoryLogRepository>,
    pub provider: Arc<ScriptedContentProvider>,
}

/// Builds the app over `planets` with trigger rolls replayed from `draws`.
/// The provider hands out sample planets and the branching encounter.
pub fn build_test_app(planets: Vec<Planet>, draws: Vec<f64>) -> TestApp {
    let provider = Arc::new(ScriptedContentProvider::new(
        vec![sample_planet("planet-scan-1"), sample_planet("planet-scan-2")],
        Some(branching_encounter()),
    ));
    build_test_app_with_provider(planets, draws, provider)
}

/// Like [`build_test_app`] with a custom provider.
pub fn build_test_app_with_provider(
    planets: Vec<Planet>,
    draws: Vec<f64>,
    provider: Arc<ScriptedContentProvider>,
) -> TestApp {
    let planet_repository = Arc::new(InMemoryPlanetRepository::with_planets(planets.clone()));
    let log_repository = Arc::new(InMemoryLogRepository::default());
    let collection = Arc::new(PlanetCollection::with_planets(
        planets,
        planet_repository.clone(),
    ));
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(SequenceRng::with_floats(draws)));

    let app_state = AppState::new(
        fixed_clock(),
        rng,
        collection,
        log_repository.clone(),
        provider.clone(),
        Some(AdminCredentials::new(ADMIN_ID, ADMIN_PASSWORD)),
    );

    TestApp {
        router: lifeindex_api::app(app_state),
        planets: planet_repository,
        logs: log_repository,
        provider,
    }
}

/// Sends one request and returns the status and JSON body (`Null` when the
/// body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<Uuid>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session_id) = session {
        builder = builder.header(SESSION_HEADER, session_id.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a GET request as `session`.
pub async fn get_json(app: &Router, uri: &str, session: Uuid) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(session), None).await
}

/// Send a POST request with a JSON body as `session`.
pub async fn post_json(
    app: &Router,
    uri: &str,
    session: Uuid,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(session), Some(body)).await
}

/// Send a POST request without a body as `session`.
pub async fn post_empty(app: &Router, uri: &str, session: Uuid) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(session), None).await
}

/// Send a DELETE request as `session`.
pub async fn delete(app: &Router, uri: &str, session: Uuid) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Some(session), None).await
}

/// Starts an explorer session and returns its id.
pub async fn start_session(app: &Router, nickname: &str) -> Uuid {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/v1/sessions",
        None,
        Some(&json!({ "nickname": nickname })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["session_id"].as_str().unwrap().parse().unwrap()
}

/// Starts a session and upgrades it to admin access.
pub async fn admin_session(app: &Router) -> Uuid {
    let session_id = start_session(app, "Commander").await;
    let (status, _) = send(
        app,
        Method::POST,
        &format!("/api/v1/sessions/{session_id}/admin"),
        None,
        Some(&json!({ "id": ADMIN_ID, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    session_id
}

/// A sample planet with `is_visible = false`.
pub fn hidden_planet(id: &str) -> Planet {
    let mut planet = sample_planet(id);
    planet.is_visible = false;
    planet
}

/// A sample planet whose first sector already carries the branching encounter.
pub fn planet_with_encounter(id: &str) -> Planet {
    let mut planet = sample_planet(id);
    planet.sectors[0].encounter = Some(branching_encounter());
    planet
}

/// Waits until the write-behind task has flushed at least `writes` snapshots.
pub async fn wait_for_writes(repo: &InMemoryPlanetRepository, writes: usize) {
    for _ in 0..100 {
        if repo.write_count() >= writes {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("expected {writes} planet writes, saw {}", repo.write_count());
}
