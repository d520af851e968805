//! Shared test mocks and fixtures for the L.I.F.E. exploration engine.

mod clock;
mod fixtures;
mod provider;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use fixtures::{branching_encounter, sample_planet, sample_sector};
pub use provider::{EmptyContentProvider, ScriptedContentProvider};
pub use repository::{
    FailingLogRepository, FailingPlanetRepository, InMemoryLogRepository, InMemoryPlanetRepository,
};
pub use rng::{MockRng, SequenceRng};
