//! Shared application state.

use std::sync::{Arc, Mutex};

use lifeindex_core::clock::Clock;
use lifeindex_core::provider::ContentProvider;
use lifeindex_core::repository::LogRepository;
use lifeindex_core::rng::DeterministicRng;
use lifeindex_exploration::application::collection::PlanetCollection;
use lifeindex_exploration::application::sessions::SessionRegistry;
use lifeindex_exploration::domain::session::AdminCredentials;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for log timestamps.
    pub clock: Arc<dyn Clock>,
    /// RNG for encounter trigger rolls.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Live explorer sessions.
    pub sessions: Arc<SessionRegistry>,
    /// The planet catalogue.
    pub collection: Arc<PlanetCollection>,
    /// Exploration log store.
    pub log_repository: Arc<dyn LogRepository>,
    /// Serializes log writes, which rewrite the whole log list.
    pub log_writes: Arc<tokio::sync::Mutex<()>>,
    /// Source of new planets and encounters.
    pub provider: Arc<dyn ContentProvider>,
    /// Admin credential pair, if admin login is enabled.
    pub admin_credentials: Option<AdminCredentials>,
}

impl AppState {
    /// Create new application state with an empty session registry.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        collection: Arc<PlanetCollection>,
        log_repository: Arc<dyn LogRepository>,
        provider: Arc<dyn ContentProvider>,
        admin_credentials: Option<AdminCredentials>,
    ) -> Self {
        Self {
            clock,
            rng,
            sessions: Arc::new(SessionRegistry::new()),
            collection,
            log_repository,
            log_writes: Arc::new(tokio::sync::Mutex::new(())),
            provider,
            admin_credentials,
        }
    }
}
