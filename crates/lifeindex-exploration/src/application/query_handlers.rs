//! Query handlers for the Exploration context.
//!
//! This module contains query handlers that read the planet collection and
//! log store through the caller's session and return read-only view DTOs.

use lifeindex_core::error::DomainError;
use lifeindex_core::model::{EncounterStep, ExplorationLog, Planet, Sector};
use lifeindex_core::repository::LogRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::collection::PlanetCollection;
use crate::application::sessions::SessionRegistry;
use crate::domain::encounter::EncounterState;
use crate::domain::navigation::{next_sector_index, previous_sector_index};
use crate::domain::session::ExplorerSession;

/// Catalogue entry for one planet.
#[derive(Debug, Serialize)]
pub struct PlanetSummaryView {
    /// The planet identifier.
    pub planet_id: String,
    /// Display name.
    pub name: String,
    /// Classification code.
    pub code: String,
    /// Summary text.
    pub description: String,
    /// Visibility flag.
    pub is_visible: bool,
    /// Display-only creation stamp.
    pub timestamp: String,
    /// Number of sectors.
    pub sector_count: usize,
    /// Image of the first sector, used as the catalogue cover.
    pub cover_image_url: Option<String>,
    /// Number of sectors with an encounter attached.
    pub encounter_count: usize,
}

impl From<&Planet> for PlanetSummaryView {
    fn from(planet: &Planet) -> Self {
        Self {
            planet_id: planet.id.clone(),
            name: planet.name.clone(),
            code: planet.code.clone(),
            description: planet.description.clone(),
            is_visible: planet.is_visible,
            timestamp: planet.timestamp.clone(),
            sector_count: planet.sectors.len(),
            cover_image_url: planet.sectors.first().map(|s| s.image_url.clone()),
            encounter_count: planet
                .sectors
                .iter()
                .filter(|s| s.encounter.is_some())
                .count(),
        }
    }
}

/// Read-only view of one sector as a session sees it.
#[derive(Debug, Serialize)]
pub struct SectorView {
    /// The owning planet.
    pub planet_id: String,
    /// Index within the planet's sector sequence.
    pub sector_index: usize,
    /// Total number of sectors on the planet.
    pub sector_count: usize,
    /// Index reached by navigating forward.
    pub next_index: usize,
    /// Index reached by navigating backward.
    pub previous_index: usize,
    /// The sector itself, encounter included.
    pub sector: Sector,
    /// Encounter lifecycle state as a string.
    pub encounter_state: &'static str,
    /// The step the encounter is currently showing, if any.
    pub current_step: Option<EncounterStep>,
    /// Discovery points this session has examined here.
    pub discovered: Vec<String>,
}

/// Looks up a planet the session is allowed to see. Hidden planets read as
/// missing for explorer sessions.
pub(crate) fn visible_planet(
    collection: &PlanetCollection,
    session: &ExplorerSession,
    planet_id: &str,
) -> Result<Planet, DomainError> {
    collection
        .planet(planet_id)
        .filter(|p| session.can_see_planet(p))
        .ok_or_else(|| DomainError::PlanetNotFound(planet_id.to_owned()))
}

/// Builds the view of `planet.sectors[sector_index]` for `session`.
pub(crate) fn sector_view(
    planet: &Planet,
    sector_index: usize,
    session: &ExplorerSession,
) -> Result<SectorView, DomainError> {
    let sector = planet
        .sectors
        .get(sector_index)
        .ok_or_else(|| DomainError::SectorNotFound {
            planet_id: planet.id.clone(),
            sector_index,
        })?;
    Ok(SectorView {
        planet_id: planet.id.clone(),
        sector_index,
        sector_count: planet.sectors.len(),
        next_index: next_sector_index(planet, sector_index)?,
        previous_index: previous_sector_index(planet, sector_index)?,
        encounter_state: EncounterState::of(sector).as_str(),
        current_step: sector
            .encounter
            .as_ref()
            .and_then(|e| e.current_step().cloned()),
        discovered: session.discovered_in(&sector.id).to_vec(),
        sector: sector.clone(),
    })
}

/// Lists the planets a session can see, in catalogue order.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn list_planets(
    session_id: Uuid,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<Vec<PlanetSummaryView>, DomainError> {
    let session = sessions.get(session_id)?;
    Ok(collection
        .read()
        .iter()
        .filter(|p| session.can_see_planet(p))
        .map(PlanetSummaryView::from)
        .collect())
}

/// Retrieves a full planet document.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session and
/// `DomainError::PlanetNotFound` if the planet is missing or hidden.
pub fn get_planet(
    session_id: Uuid,
    planet_id: &str,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<Planet, DomainError> {
    let session = sessions.get(session_id)?;
    visible_planet(collection, &session, planet_id)
}

/// Retrieves one sector without rolling for an encounter.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound` or
/// `DomainError::SectorNotFound`.
pub fn get_sector(
    session_id: Uuid,
    planet_id: &str,
    sector_index: usize,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<SectorView, DomainError> {
    let session = sessions.get(session_id)?;
    let planet = visible_planet(collection, &session, planet_id)?;
    sector_view(&planet, sector_index, &session)
}

/// Lists the logs a session can see: its own, or all of them for admins.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` or the store's error.
pub async fn list_logs(
    session_id: Uuid,
    sessions: &SessionRegistry,
    logs: &dyn LogRepository,
) -> Result<Vec<ExplorationLog>, DomainError> {
    let session = sessions.get(session_id)?;
    Ok(logs
        .load_logs()
        .await?
        .into_iter()
        .filter(|l| session.can_see_log(l))
        .collect())
}

/// Lists every log written about one planet.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound` or
/// the store's error.
pub async fn planet_logs(
    session_id: Uuid,
    planet_id: &str,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
    logs: &dyn LogRepository,
) -> Result<Vec<ExplorationLog>, DomainError> {
    let session = sessions.get(session_id)?;
    visible_planet(collection, &session, planet_id)?;
    Ok(logs
        .load_logs()
        .await?
        .into_iter()
        .filter(|l| l.planet_id == planet_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lifeindex_core::error::DomainError;
    use lifeindex_core::model::ExplorationLog;
    use lifeindex_test_support::{
        InMemoryLogRepository, InMemoryPlanetRepository, branching_encounter, sample_planet,
    };

    use super::*;
    use crate::domain::session::AccessLevel;

    fn log(id: &str, planet_id: &str, author: &str) -> ExplorationLog {
        ExplorationLog {
            id: id.to_owned(),
            planet_id: planet_id.to_owned(),
            planet_name: "Kepler Void".to_owned(),
            author: author.to_owned(),
            content: "Cold.".to_owned(),
            timestamp: 1_768_471_200_000,
            is_visible: true,
        }
    }

    fn catalogue() -> PlanetCollection {
        let mut hidden = sample_planet("planet-hidden");
        hidden.is_visible = false;
        PlanetCollection::with_planets(
            vec![sample_planet("planet-a"), hidden],
            Arc::new(InMemoryPlanetRepository::default()),
        )
    }

    #[tokio::test]
    async fn test_list_planets_hides_invisible_planets_from_explorers() {
        // Arrange
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("vega").unwrap().id;
        let collection = catalogue();

        // Act
        let views = list_planets(session_id, &sessions, &collection).unwrap();

        // Assert
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].planet_id, "planet-a");
        assert_eq!(views[0].sector_count, 5);
        assert!(views[0].cover_image_url.is_some());
    }

    #[tokio::test]
    async fn test_list_planets_shows_everything_to_admins() {
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("root").unwrap().id;
        sessions
            .with_session(session_id, |s| {
                s.access = AccessLevel::Admin;
                Ok(())
            })
            .unwrap();
        let collection = catalogue();

        let views = list_planets(session_id, &sessions, &collection).unwrap();

        assert_eq!(views.len(), 2);
    }

    #[tokio::test]
    async fn test_get_hidden_planet_reads_as_not_found() {
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("vega").unwrap().id;
        let collection = catalogue();

        let result = get_planet(session_id, "planet-hidden", &sessions, &collection);

        match result {
            Err(DomainError::PlanetNotFound(id)) => assert_eq!(id, "planet-hidden"),
            other => panic!("expected PlanetNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_sector_reports_navigation_and_encounter_step() {
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("vega").unwrap().id;
        let mut planet = sample_planet("planet-a");
        planet.sectors[4].encounter = Some(branching_encounter());
        let collection = PlanetCollection::with_planets(
            vec![planet],
            Arc::new(InMemoryPlanetRepository::default()),
        );

        let view = get_sector(session_id, "planet-a", 4, &sessions, &collection).unwrap();

        assert_eq!(view.next_index, 0);
        assert_eq!(view.previous_index, 3);
        assert_eq!(view.encounter_state, "in_progress");
        assert_eq!(view.current_step.unwrap().id, "start");
        assert!(view.discovered.is_empty());
    }

    #[tokio::test]
    async fn test_list_logs_filters_by_author_for_explorers() {
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("vega").unwrap().id;
        let logs = InMemoryLogRepository::with_logs(vec![
            log("log-1", "planet-a", "vega"),
            log("log-2", "planet-a", "altair"),
        ]);

        let visible = list_logs(session_id, &sessions, &logs).await.unwrap();

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "log-1");
    }

    #[tokio::test]
    async fn test_planet_logs_returns_all_authors_for_that_planet() {
        let sessions = SessionRegistry::new();
        let session_id = sessions.start("vega").unwrap().id;
        let collection = catalogue();
        let logs = InMemoryLogRepository::with_logs(vec![
            log("log-1", "planet-a", "vega"),
            log("log-2", "planet-a", "altair"),
            log("log-3", "planet-gone", "vega"),
        ]);

        let scoped = planet_logs(session_id, "planet-a", &sessions, &collection, &logs)
            .await
            .unwrap();

        let ids: Vec<_> = scoped.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["log-1", "log-2"]);
    }
}
