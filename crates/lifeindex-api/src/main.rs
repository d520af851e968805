//! L.I.F.E. API server entry point.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use lifeindex_api::config::AppConfig;
use lifeindex_api::error::AppError;
use lifeindex_api::state::AppState;
use lifeindex_content::fallback::FallbackContentProvider;
use lifeindex_content::gemini::{GeminiClient, GeminiContentProvider};
use lifeindex_content::local::LocalGenerator;
use lifeindex_core::clock::{Clock, SystemClock};
use lifeindex_core::provider::ContentProvider;
use lifeindex_core::repository::{LogRepository, PlanetRepository};
use lifeindex_core::rng::{DeterministicRng, StdRandom};
use lifeindex_exploration::application::collection::PlanetCollection;
use lifeindex_exploration::application::sessions::SessionRegistry;
use lifeindex_store::memory::{MemoryLogRepository, MemoryPlanetRepository};
use lifeindex_store::pg_log_repository::PgLogRepository;
use lifeindex_store::pg_planet_repository::PgPlanetRepository;
use lifeindex_store::run_migrations;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting L.I.F.E. API server");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;

    let (planet_repository, log_repository) = open_stores(&config).await?;
    let collection = Arc::new(PlanetCollection::load(planet_repository).await?);
    tracing::info!(planets = collection.read().len(), "planet catalogue loaded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(StdRandom::from_entropy()));
    let provider = content_provider(&config, &clock, &rng);

    if config.admin.is_none() {
        tracing::warn!("ADMIN_ID/ADMIN_PASSWORD not set; admin login is disabled");
    }

    let app_state = AppState::new(
        clock,
        rng,
        collection,
        log_repository,
        provider,
        config.admin.clone(),
    );
    tokio::spawn(expire_idle_sessions(
        Arc::clone(&app_state.sessions),
        config.session_idle_timeout,
    ));

    // TODO: restrict CORS origins once the console's deployment host is fixed.
    let app = lifeindex_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Opens the `PostgreSQL` stores when `DATABASE_URL` is set, volatile
/// in-memory stores otherwise.
async fn open_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn PlanetRepository>, Arc<dyn LogRepository>), AppError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set; planets and logs will not survive a restart");
        return Ok((
            Arc::new(MemoryPlanetRepository::default()),
            Arc::new(MemoryLogRepository::default()),
        ));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    run_migrations(&pool).await.map_err(sqlx::Error::from)?;

    Ok((
        Arc::new(PgPlanetRepository::new(pool.clone())),
        Arc::new(PgLogRepository::new(pool)),
    ))
}

/// Gemini backed by the local generator when a key is configured, the local
/// generator alone otherwise.
fn content_provider(
    config: &AppConfig,
    clock: &Arc<dyn Clock>,
    rng: &Arc<Mutex<dyn DeterministicRng + Send>>,
) -> Arc<dyn ContentProvider> {
    let local: Arc<dyn ContentProvider> =
        Arc::new(LocalGenerator::new(Arc::clone(clock), Arc::clone(rng)));
    match &config.gemini {
        Some(gemini) => {
            tracing::info!(
                model = %gemini.model,
                "using Gemini content provider with local fallback"
            );
            let client = GeminiClient::new(&gemini.base_url, &gemini.model, &gemini.api_key);
            let remote = Arc::new(GeminiContentProvider::new(
                client,
                Arc::clone(clock),
                Arc::clone(rng),
            ));
            Arc::new(FallbackContentProvider::new(remote, local))
        }
        None => {
            tracing::info!("GEMINI_API_KEY not set; using local content generator");
            local
        }
    }
}

/// Periodically drops sessions idle for longer than `max_idle`.
async fn expire_idle_sessions(sessions: Arc<SessionRegistry>, max_idle: Duration) {
    let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        let expired = sessions.expire_idle(max_idle);
        if expired > 0 {
            tracing::info!(expired, "expired idle sessions");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
