//! Route modules, plus the session header extractor they share.

pub mod health;
pub mod logs;
pub mod planets;
pub mod sectors;
pub mod sessions;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lifeindex_core::error::DomainError;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the caller's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// The caller's session id, taken from the `x-session-id` header.
///
/// A missing header is rejected as unauthorized; a malformed one as a
/// validation error.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SESSION_HEADER).ok_or_else(|| {
            ApiError(DomainError::Unauthorized(format!("missing {SESSION_HEADER} header")))
        })?;
        let raw = value.to_str().map_err(|_| {
            ApiError(DomainError::Validation(format!("{SESSION_HEADER} is not valid text")))
        })?;
        Uuid::parse_str(raw.trim()).map(Self).map_err(|e| {
            ApiError(DomainError::Validation(format!("invalid {SESSION_HEADER}: {e}")))
        })
    }
}
