//! Test content providers.

use std::sync::Mutex;

use async_trait::async_trait;
use lifeindex_core::model::{Encounter, Planet};
use lifeindex_core::provider::ContentProvider;

/// A provider that hands out pre-built planets and encounters and counts
/// encounter requests.
#[derive(Debug, Default)]
pub struct ScriptedContentProvider {
    planets: Vec<Planet>,
    encounter: Option<Encounter>,
    encounter_requests: Mutex<usize>,
}

impl ScriptedContentProvider {
    /// Create a provider that returns `planets` and `encounter`.
    #[must_use]
    pub fn new(planets: Vec<Planet>, encounter: Option<Encounter>) -> Self {
        Self {
            planets,
            encounter,
            encounter_requests: Mutex::new(0),
        }
    }

    /// Create a provider that only produces `encounter`.
    #[must_use]
    pub fn with_encounter(encounter: Encounter) -> Self {
        Self::new(vec![], Some(encounter))
    }

    /// Returns how many encounters were requested.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn encounter_requests(&self) -> usize {
        *self.encounter_requests.lock().unwrap()
    }
}

#[async_trait]
impl ContentProvider for ScriptedContentProvider {
    async fn generate_planets(&self, count: usize) -> Vec<Planet> {
        self.planets.iter().take(count).cloned().collect()
    }

    async fn generate_encounter(&self) -> Option<Encounter> {
        *self.encounter_requests.lock().unwrap() += 1;
        self.encounter.clone()
    }
}

/// A provider whose every request fails (empty result).
#[derive(Debug)]
pub struct EmptyContentProvider;

#[async_trait]
impl ContentProvider for EmptyContentProvider {
    async fn generate_planets(&self, _count: usize) -> Vec<Planet> {
        vec![]
    }

    async fn generate_encounter(&self) -> Option<Encounter> {
        None
    }
}
