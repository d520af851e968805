//! Content provider abstraction.
//!
//! A provider turns a generation request into fully assembled entities.
//! Failure of any kind (transport, quota, unparseable payload) is reported as
//! an empty result, never as an error: callers treat "nothing generated" as a
//! normal, recoverable outcome.

use async_trait::async_trait;

use crate::model::{Encounter, Planet};

/// Source of generated planets and encounters.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate up to `count` planets. Returns an empty `Vec` on failure.
    async fn generate_planets(&self, count: usize) -> Vec<Planet>;

    /// Generate one encounter. Returns `None` on failure.
    async fn generate_encounter(&self) -> Option<Encounter>;
}
