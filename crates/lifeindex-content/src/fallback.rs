//! Provider chaining: remote first, local when the remote yields nothing.

use std::sync::Arc;

use async_trait::async_trait;
use lifeindex_core::model::{Encounter, Planet};
use lifeindex_core::provider::ContentProvider;
use tracing::info;

/// Tries `primary`, then `secondary` when the primary result is empty.
pub struct FallbackContentProvider {
    primary: Arc<dyn ContentProvider>,
    secondary: Arc<dyn ContentProvider>,
}

impl FallbackContentProvider {
    /// Chains two providers.
    #[must_use]
    pub fn new(primary: Arc<dyn ContentProvider>, secondary: Arc<dyn ContentProvider>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl ContentProvider for FallbackContentProvider {
    async fn generate_planets(&self, count: usize) -> Vec<Planet> {
        let planets = self.primary.generate_planets(count).await;
        if !planets.is_empty() {
            return planets;
        }
        info!(requested = count, "primary provider returned no planets; using fallback");
        self.secondary.generate_planets(count).await
    }

    async fn generate_encounter(&self) -> Option<Encounter> {
        if let Some(encounter) = self.primary.generate_encounter().await {
            return Some(encounter);
        }
        info!("primary provider returned no encounter; using fallback");
        self.secondary.generate_encounter().await
    }
}
