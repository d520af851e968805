//! Test repositories — in-memory and failing store implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lifeindex_core::error::DomainError;
use lifeindex_core::model::{ExplorationLog, Planet};
use lifeindex_core::repository::{LogRepository, PlanetRepository};

/// A planet store that keeps the collection in memory and counts every
/// `replace_all` call.
#[derive(Debug, Default)]
pub struct InMemoryPlanetRepository {
    planets: Mutex<Vec<Planet>>,
    writes: Mutex<usize>,
}

impl InMemoryPlanetRepository {
    /// Create a store pre-populated with `planets`.
    #[must_use]
    pub fn with_planets(planets: Vec<Planet>) -> Self {
        Self {
            planets: Mutex::new(planets),
            writes: Mutex::new(0),
        }
    }

    /// Returns a snapshot of the stored planets.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Vec<Planet> {
        self.planets.lock().unwrap().clone()
    }

    /// Returns how many times `replace_all` has been called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl PlanetRepository for InMemoryPlanetRepository {
    async fn load_all(&self) -> Result<Vec<Planet>, DomainError> {
        Ok(self.planets.lock().unwrap().clone())
    }

    async fn replace_all(&self, planets: &[Planet]) -> Result<(), DomainError> {
        *self.planets.lock().unwrap() = planets.to_vec();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

/// A planet store that loads an empty collection and rejects every write.
/// Useful for testing persistence-failure paths.
#[derive(Debug)]
pub struct FailingPlanetRepository;

#[async_trait]
impl PlanetRepository for FailingPlanetRepository {
    async fn load_all(&self) -> Result<Vec<Planet>, DomainError> {
        Ok(vec![])
    }

    async fn replace_all(&self, _planets: &[Planet]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage quota exceeded".into()))
    }
}

/// A log store that keeps the list in memory.
#[derive(Debug, Default)]
pub struct InMemoryLogRepository {
    logs: Mutex<Vec<ExplorationLog>>,
}

impl InMemoryLogRepository {
    /// Create a store pre-populated with `logs`.
    #[must_use]
    pub fn with_logs(logs: Vec<ExplorationLog>) -> Self {
        Self {
            logs: Mutex::new(logs),
        }
    }

    /// Returns a snapshot of the stored logs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Vec<ExplorationLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogRepository for InMemoryLogRepository {
    async fn load_logs(&self) -> Result<Vec<ExplorationLog>, DomainError> {
        Ok(self.logs.lock().unwrap().clone())
    }

    async fn save_logs(&self, logs: &[ExplorationLog]) -> Result<(), DomainError> {
        *self.logs.lock().unwrap() = logs.to_vec();
        Ok(())
    }
}

/// A log store that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingLogRepository;

#[async_trait]
impl LogRepository for FailingLogRepository {
    async fn load_logs(&self) -> Result<Vec<ExplorationLog>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save_logs(&self, _logs: &[ExplorationLog]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
