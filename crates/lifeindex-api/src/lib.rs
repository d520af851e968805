//! L.I.F.E. — HTTP API server.
//!
//! [`app`] assembles every route over an [`state::AppState`]; `main` adds the
//! tracing and CORS layers and serves it.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

/// Builds the full router with `state` applied.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/sessions", routes::sessions::router())
        .nest(
            "/api/v1/planets",
            routes::planets::router().merge(routes::sectors::router()),
        )
        .nest("/api/v1/logs", routes::logs::router())
        .with_state(state)
}
