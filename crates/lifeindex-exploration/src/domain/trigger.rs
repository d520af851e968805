//! Encounter trigger policy.
//!
//! Each `(planet id, sector index)` pair is rolled at most once per explorer
//! session. A roll triggers with probability [`ENCOUNTER_CHANCE`], and the last
//! sector of a planet that has no encounter anywhere always triggers, so every
//! planet yields an encounter by the time the explorer reaches its end.

use std::collections::HashMap;

use lifeindex_core::error::DomainError;
use lifeindex_core::model::Planet;
use lifeindex_core::rng::DeterministicRng;

/// Probability that a fresh roll spawns an encounter.
pub const ENCOUNTER_CHANCE: f64 = 0.20;

/// Session-scoped "already rolled" markers keyed by `(planet id, sector index)`.
#[derive(Debug, Clone, Default)]
pub struct TriggerMarkers {
    rolled: HashMap<(String, usize), bool>,
}

impl TriggerMarkers {
    /// The memoized decision for a pair, if it was rolled this session.
    #[must_use]
    pub fn decision(&self, planet_id: &str, sector_index: usize) -> Option<bool> {
        self.rolled
            .get(&(planet_id.to_owned(), sector_index))
            .copied()
    }

    /// Number of pairs rolled this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rolled.len()
    }

    /// Whether no pair has been rolled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rolled.is_empty()
    }

    /// Drops every marker.
    pub fn clear(&mut self) {
        self.rolled.clear();
    }

    fn mark(&mut self, planet_id: &str, sector_index: usize, triggered: bool) {
        self.rolled
            .insert((planet_id.to_owned(), sector_index), triggered);
    }
}

/// Outcome of evaluating the trigger policy for one sector visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerDecision {
    /// The sector already has an encounter; nothing was rolled.
    AlreadyPresent,
    /// The pair was rolled earlier this session; this is the stored decision.
    Memoized(bool),
    /// A fresh roll happened.
    Rolled {
        /// The uniform draw in `[0, 1)`.
        draw: f64,
        /// Whether the last-sector guarantee applied.
        guaranteed: bool,
        /// Whether an encounter should be spawned.
        triggered: bool,
    },
}

impl TriggerDecision {
    /// The decision for this pair, memoized or fresh.
    #[must_use]
    pub fn should_trigger(self) -> bool {
        match self {
            Self::AlreadyPresent => false,
            Self::Memoized(triggered) | Self::Rolled { triggered, .. } => triggered,
        }
    }

    /// Whether the caller should request a new encounter now. Only a fresh
    /// positive roll does; a memoized `true` whose request failed is not retried.
    #[must_use]
    pub fn spawn_requested(self) -> bool {
        matches!(self, Self::Rolled { triggered: true, .. })
    }
}

/// Evaluates the trigger policy for `planet.sectors[sector_index]`.
///
/// The marker is written before this function returns, so it is in place
/// before any provider request the caller issues afterwards.
///
/// # Errors
///
/// Returns `DomainError::SectorNotFound` if `sector_index` is out of range.
pub fn evaluate(
    markers: &mut TriggerMarkers,
    planet: &Planet,
    sector_index: usize,
    rng: &mut dyn DeterministicRng,
) -> Result<TriggerDecision, DomainError> {
    let sector = planet
        .sectors
        .get(sector_index)
        .ok_or_else(|| DomainError::SectorNotFound {
            planet_id: planet.id.clone(),
            sector_index,
        })?;

    if sector.encounter.is_some() {
        return Ok(TriggerDecision::AlreadyPresent);
    }

    if let Some(triggered) = markers.decision(&planet.id, sector_index) {
        return Ok(TriggerDecision::Memoized(triggered));
    }

    let draw = rng.next_f64();
    let guaranteed = planet.last_sector_index() == Some(sector_index) && !planet.has_encounter();
    let triggered = draw <= ENCOUNTER_CHANCE || guaranteed;
    markers.mark(&planet.id, sector_index, triggered);

    Ok(TriggerDecision::Rolled {
        draw,
        guaranteed,
        triggered,
    })
}
