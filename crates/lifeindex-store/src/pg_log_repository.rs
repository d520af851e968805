//! `PostgreSQL` implementation of the `LogRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use lifeindex_core::error::DomainError;
use lifeindex_core::model::ExplorationLog;
use lifeindex_core::repository::LogRepository;

use crate::documents::{DocumentTable, load_documents, replace_documents};

/// PostgreSQL-backed exploration log store.
#[derive(Debug, Clone)]
pub struct PgLogRepository {
    pool: PgPool,
}

impl PgLogRepository {
    /// Creates a new `PgLogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogRepository for PgLogRepository {
    async fn load_logs(&self) -> Result<Vec<ExplorationLog>, DomainError> {
        load_documents(&self.pool, DocumentTable::ExplorationLogs).await
    }

    async fn save_logs(&self, logs: &[ExplorationLog]) -> Result<(), DomainError> {
        replace_documents(&self.pool, DocumentTable::ExplorationLogs, logs, |l| l.id.as_str()).await
    }
}
