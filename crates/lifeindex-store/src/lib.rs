//! L.I.F.E. Store — implementations of the durable store ports.
//!
//! The `PostgreSQL` stores keep one JSONB document per row plus its position in the
//! collection. `replace_all` / `save_logs` rewrite the whole table inside one
//! transaction, so a failed write leaves the previous collection intact.
//! [`memory`] holds volatile stores for running without a database.

mod documents;
pub mod memory;
pub mod pg_log_repository;
pub mod pg_planet_repository;

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies pending schema migrations.
///
/// # Errors
///
/// Returns the migrator's error if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
