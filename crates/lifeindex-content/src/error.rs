//! Content generation errors.
//!
//! These stay inside the crate's providers: the `ContentProvider` contract
//! reports failure as an empty result, so a `GenerationError` is logged and
//! dropped at that boundary.

use thiserror::Error;

/// Why a generation request produced no usable payload.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never got a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status (quota, auth, outage).
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response carried no text candidate.
    #[error("response contained no text")]
    EmptyResponse,

    /// The text could not be parsed into the expected structure.
    #[error("malformed payload: {0}")]
    Malformed(String),
}
