//! Whole-table document reads and writes shared by both stores.

use lifeindex_core::error::DomainError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

/// Tables holding `(id, document, position)` rows.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DocumentTable {
    Planets,
    ExplorationLogs,
}

impl DocumentTable {
    fn name(self) -> &'static str {
        match self {
            Self::Planets => "planets",
            Self::ExplorationLogs => "exploration_logs",
        }
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

/// Reads every document in collection order.
pub(crate) async fn load_documents<T>(
    pool: &PgPool,
    table: DocumentTable,
) -> Result<Vec<T>, DomainError>
where
    T: DeserializeOwned + Send + Unpin + 'static,
{
    let sql = format!("SELECT document FROM {} ORDER BY position", table.name());
    let rows: Vec<Json<T>> = sqlx::query_scalar(&sql)
        .fetch_all(pool)
        .await
        .map_err(infrastructure)?;
    debug!(table = table.name(), rows = rows.len(), "documents loaded");
    Ok(rows.into_iter().map(|Json(document)| document).collect())
}

/// Clears the table and writes `documents` in one transaction.
///
/// Duplicate ids violate the primary key and abort the whole write.
pub(crate) async fn replace_documents<T>(
    pool: &PgPool,
    table: DocumentTable,
    documents: &[T],
    id_of: impl Fn(&T) -> &str,
) -> Result<(), DomainError>
where
    T: Serialize + Sync,
{
    let mut tx = pool.begin().await.map_err(infrastructure)?;

    sqlx::query(&format!("DELETE FROM {}", table.name()))
        .execute(&mut *tx)
        .await
        .map_err(infrastructure)?;

    let insert = format!(
        "INSERT INTO {} (id, document, position) VALUES ($1, $2, $3)",
        table.name()
    );
    for (position, document) in documents.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| {
            DomainError::Infrastructure(format!("{} collection too large", table.name()))
        })?;
        sqlx::query(&insert)
            .bind(id_of(document))
            .bind(Json(document))
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?;
    }

    tx.commit().await.map_err(infrastructure)?;
    debug!(table = table.name(), rows = documents.len(), "documents replaced");
    Ok(())
}
