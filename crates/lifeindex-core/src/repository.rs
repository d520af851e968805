//! Durable store abstractions.
//!
//! Both stores work on whole collections: there is no partial patch API.
//! Every mutation reads the full collection, produces a new one and writes
//! it back with `replace_all`.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::model::{ExplorationLog, Planet};

/// Durable key-value store for the planet collection, keyed by planet id.
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// Read every stored planet.
    async fn load_all(&self) -> Result<Vec<Planet>, DomainError>;

    /// Clear the store and write `planets` as a single durable unit.
    async fn replace_all(&self, planets: &[Planet]) -> Result<(), DomainError>;
}

/// Durable list store for exploration logs, keyed by log id.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Read the full log list, newest first.
    async fn load_logs(&self) -> Result<Vec<ExplorationLog>, DomainError>;

    /// Overwrite the full log list.
    async fn save_logs(&self, logs: &[ExplorationLog]) -> Result<(), DomainError>;
}
