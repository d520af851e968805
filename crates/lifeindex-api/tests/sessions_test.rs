//! Integration tests for explorer sessions and the admin gate.

mod common;

use axum::http::{Method, StatusCode};
use lifeindex_api::routes::SESSION_HEADER;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_start_session_returns_explorer_session() {
    let app = common::build_test_app(vec![], vec![]);

    let (status, json) = common::send(
        &app.router,
        Method::POST,
        "/api/v1/sessions",
        None,
        Some(&json!({ "nickname": "  Vega  " })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["nickname"], "Vega");
    assert_eq!(json["access"], "explorer");
    assert!(json["session_id"].is_string());
}

#[tokio::test]
async fn test_blank_nickname_is_rejected() {
    let app = common::build_test_app(vec![], vec![]);

    let (status, json) = common::send(
        &app.router,
        Method::POST,
        "/api/v1/sessions",
        None,
        Some(&json!({ "nickname": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_admin_login_and_logout_round_trip() {
    let app = common::build_test_app(vec![], vec![]);
    let session_id = common::admin_session(&app.router).await;

    let (status, json) = common::send(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/sessions/{session_id}/admin"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["access"], "explorer");
}

#[tokio::test]
async fn test_wrong_admin_password_is_unauthorized() {
    let app = common::build_test_app(vec![], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, json) = common::send(
        &app.router,
        Method::POST,
        &format!("/api/v1/sessions/{session_id}/admin"),
        None,
        Some(&json!({ "id": common::ADMIN_ID, "password": "guess" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn test_ended_session_is_no_longer_found() {
    let app = common::build_test_app(vec![], vec![]);
    let session_id = common::start_session(&app.router, "Vega").await;

    let (status, _) = common::send(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/sessions/{session_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = common::get_json(&app.router, "/api/v1/planets", session_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
}

#[tokio::test]
async fn test_missing_session_header_is_unauthorized() {
    let app = common::build_test_app(vec![], vec![]);

    let (status, json) =
        common::send(&app.router, Method::GET, "/api/v1/planets", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn test_malformed_session_header_is_rejected() {
    let app = common::build_test_app(vec![], vec![]);
    let request = axum::http::Request::builder()
        .uri("/api/v1/planets")
        .header(SESSION_HEADER, "not-a-uuid")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
