//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A planet was not found (or is hidden from the caller).
    #[error("planet not found: {0}")]
    PlanetNotFound(String),

    /// A sector index is outside the planet's sector sequence.
    #[error("sector {sector_index} not found on planet {planet_id}")]
    SectorNotFound {
        /// The planet that was addressed.
        planet_id: String,
        /// The out-of-range index.
        sector_index: usize,
    },

    /// An exploration log was not found.
    #[error("log not found: {0}")]
    LogNotFound(String),

    /// An explorer session was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A state transition was rejected (e.g. a choice on a completed encounter).
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// The caller lacks the access level required for the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
