//! `PostgreSQL` implementation of the `PlanetRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use lifeindex_core::error::DomainError;
use lifeindex_core::model::Planet;
use lifeindex_core::repository::PlanetRepository;

use crate::documents::{DocumentTable, load_documents, replace_documents};

/// PostgreSQL-backed planet store.
#[derive(Debug, Clone)]
pub struct PgPlanetRepository {
    pool: PgPool,
}

impl PgPlanetRepository {
    /// Creates a new `PgPlanetRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanetRepository for PgPlanetRepository {
    async fn load_all(&self) -> Result<Vec<Planet>, DomainError> {
        load_documents(&self.pool, DocumentTable::Planets).await
    }

    async fn replace_all(&self, planets: &[Planet]) -> Result<(), DomainError> {
        replace_documents(&self.pool, DocumentTable::Planets, planets, |p| p.id.as_str()).await
    }
}
