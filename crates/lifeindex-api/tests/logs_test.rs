//! Integration tests for exploration logs.

mod common;

use axum::http::StatusCode;
use lifeindex_test_support::sample_planet;
use serde_json::{Value, json};

async fn write_log(
    app: &axum::Router,
    session_id: uuid::Uuid,
    content: &str,
) -> (StatusCode, Value) {
    common::post_json(
        app,
        "/api/v1/logs",
        session_id,
        &json!({ "planet_id": "planet-a", "content": content }),
    )
    .await
}

#[tokio::test]
async fn test_write_log_denormalises_planet_and_stamps_time() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = write_log(&app.router, session_id, "  Frost on every ridge.  ").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["planetName"], "Kepler Void");
    assert_eq!(json["author"], "Vega");
    assert_eq!(json["content"], "Frost on every ridge.");
    assert_eq!(json["timestamp"], 1_768_471_200_000_i64);
    assert_eq!(json["isVisible"], true);
    assert_eq!(app.logs.stored().len(), 1);
}

#[tokio::test]
async fn test_newest_log_comes_first() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;
    write_log(&app.router, session_id, "First.").await;
    write_log(&app.router, session_id, "Second.").await;

    let (status, json) = common::get_json(&app.router, "/api/v1/logs", session_id).await;

    assert_eq!(status, StatusCode::OK);
    let contents: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["content"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(contents, vec!["Second.", "First."]);
}

#[tokio::test]
async fn test_blank_log_is_rejected() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = write_log(&app.router, session_id, "   ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert!(app.logs.stored().is_empty());
}

#[tokio::test]
async fn test_log_for_unknown_planet_is_not_found() {
    let app = common::build_test_app(vec![], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = write_log(&app.router, session_id, "Nothing here.").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "planet_not_found");
}

#[tokio::test]
async fn test_log_list_is_private_but_planet_logs_are_shared() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let vega = common::start_session(&app.router, "Vega").await;
    let altair = common::start_session(&app.router, "Altair").await;
    let admin = common::admin_session(&app.router).await;
    write_log(&app.router, vega, "Vega was here.").await;
    write_log(&app.router, altair, "Altair was here.").await;

    let (_, own) = common::get_json(&app.router, "/api/v1/logs", vega).await;
    let (_, all) = common::get_json(&app.router, "/api/v1/logs", admin).await;
    let (_, scoped) = common::get_json(&app.router, "/api/v1/planets/planet-a/logs", altair).await;

    assert_eq!(own.as_array().unwrap().len(), 1);
    assert_eq!(own[0]["author"], "Vega");
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(scoped.as_array().unwrap().len(), 2);
    assert_eq!(scoped[0]["author"], "Altair");
}

#[tokio::test]
async fn test_author_can_delete_log_but_others_cannot() {
    let app = common::build_test_app(vec![sample_planet("planet-a")], vec![]);
    let vega = common::start_session(&app.router, "Vega").await;
    let altair = common::start_session(&app.router, "Altair").await;
    let (_, log) = write_log(&app.router, vega, "Mine.").await;
    let uri = format!("/api/v1/logs/{}", log["id"].as_str().unwrap());

    let (status, json) = common::delete(&app.router, &uri, altair).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");

    let (status, json) = common::delete(&app.router, &uri, vega).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "Mine.");
    assert!(app.logs.stored().is_empty());
}

#[tokio::test]
async fn test_deleting_unknown_log_is_not_found() {
    let app = common::build_test_app(vec![], vec![]);
    let admin = common::admin_session(&app.router).await;

    let (status, json) = common::delete(&app.router, "/api/v1/logs/log-missing", admin).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "log_not_found");
}
