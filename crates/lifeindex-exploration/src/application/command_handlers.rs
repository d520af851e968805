//! Command handlers for the Exploration context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: resolve the session, read the latest planet
//! snapshot, apply the domain transition, and write the result back through
//! the planet collection or log store.

use std::sync::{Mutex, PoisonError};

use lifeindex_core::clock::Clock;
use lifeindex_core::error::DomainError;
use lifeindex_core::model::{DiscoveryPoint, Encounter, ExplorationLog, Planet, Sector};
use lifeindex_core::provider::ContentProvider;
use lifeindex_core::repository::LogRepository;
use lifeindex_core::rng::DeterministicRng;
use tracing::{info, warn};
use uuid::{NoContext, Timestamp, Uuid};

use crate::application::collection::{PendingWrite, PlanetCollection};
use crate::application::query_handlers::{SectorView, sector_view, visible_planet};
use crate::application::sessions::SessionRegistry;
use crate::domain::commands::{
    DeleteLog, DeletePlanet, EndSession, ExamineDiscoveryPoint, LoginAdmin, LogoutAdmin,
    ScanPlanets, StartSession, SubmitChoice, ToggleVisibility, VisitSector, WriteLog,
};
use crate::domain::encounter;
use crate::domain::session::{AdminCredentials, ExplorerSession};
use crate::domain::trigger::{self, TriggerDecision};

/// Result of a command that changed the planet collection.
///
/// The in-memory change has already happened; `persisted` reports whether the
/// durable write succeeded.
#[derive(Debug)]
pub struct CollectionChange<T> {
    /// The command's result value.
    pub value: T,
    /// Whether the change reached durable storage.
    pub persisted: bool,
}

/// Result of visiting a sector.
#[derive(Debug)]
pub struct SectorVisit {
    /// The sector as it stands after the visit.
    pub view: SectorView,
    /// What the trigger policy decided.
    pub decision: TriggerDecision,
    /// Whether this visit attached a new encounter.
    pub encounter_spawned: bool,
    /// Outcome of the durable write for a spawned encounter.
    pub persisted: Option<bool>,
}

/// Result of examining a discovery point.
#[derive(Debug)]
pub struct Discovery {
    /// The examined point.
    pub point: DiscoveryPoint,
    /// `false` if the session had examined this point before.
    pub first_time: bool,
}

async fn settle(write: PendingWrite, correlation_id: Uuid) -> bool {
    match write.acknowledged().await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                %correlation_id,
                error = %e,
                "planet collection not persisted; change kept in memory"
            );
            false
        }
    }
}

/// Copies `planets`, applies `f` to one sector of one planet, and returns the
/// new collection.
fn modify_sector<T>(
    planets: &[Planet],
    planet_id: &str,
    sector_index: usize,
    f: impl FnOnce(&mut Sector) -> Result<T, DomainError>,
) -> Result<(Vec<Planet>, T), DomainError> {
    let mut next = planets.to_vec();
    let planet = next
        .iter_mut()
        .find(|p| p.id == planet_id)
        .ok_or_else(|| DomainError::PlanetNotFound(planet_id.to_owned()))?;
    let sector = planet
        .sectors
        .get_mut(sector_index)
        .ok_or_else(|| DomainError::SectorNotFound {
            planet_id: planet_id.to_owned(),
            sector_index,
        })?;
    let value = f(sector)?;
    Ok((next, value))
}

/// Handles the `StartSession` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the nickname is blank.
pub fn handle_start_session(
    command: &StartSession,
    sessions: &SessionRegistry,
) -> Result<ExplorerSession, DomainError> {
    let session = sessions.start(&command.nickname)?;
    info!(
        correlation_id = %command.correlation_id,
        session_id = %session.id,
        "explorer session started"
    );
    Ok(session)
}

/// Handles the `EndSession` command. Trigger markers and discoveries are
/// dropped with the session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is unknown.
pub fn handle_end_session(
    command: &EndSession,
    sessions: &SessionRegistry,
) -> Result<(), DomainError> {
    let session = sessions.end(command.session_id)?;
    info!(
        correlation_id = %command.correlation_id,
        session_id = %session.id,
        rolled = session.markers.len(),
        "explorer session ended"
    );
    Ok(())
}

/// Handles the `LoginAdmin` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` or `DomainError::Unauthorized`.
pub fn handle_login_admin(
    command: &LoginAdmin,
    credentials: Option<&AdminCredentials>,
    sessions: &SessionRegistry,
) -> Result<ExplorerSession, DomainError> {
    let result = sessions.with_session(command.session_id, |session| {
        session.login_admin(&command.admin_id, &command.password, credentials)?;
        Ok(session.clone())
    });
    match &result {
        Ok(_) => info!(correlation_id = %command.correlation_id, "admin access granted"),
        Err(e) => warn!(
            correlation_id = %command.correlation_id,
            error = %e,
            "admin login rejected"
        ),
    }
    result
}

/// Handles the `LogoutAdmin` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is unknown.
pub fn handle_logout_admin(
    command: &LogoutAdmin,
    sessions: &SessionRegistry,
) -> Result<ExplorerSession, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling logout admin command");
    sessions.with_session(command.session_id, |session| {
        session.logout_admin();
        Ok(session.clone())
    })
}

/// Handles the `ScanPlanets` command: asks the provider for new planets and
/// appends them to the catalogue.
///
/// A provider failure yields an empty result, not an error. `persisted` is
/// `true` when there was nothing to write.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::Unauthorized` for
/// explorer sessions, or `DomainError::Validation` for a zero count.
pub async fn handle_scan_planets(
    command: &ScanPlanets,
    sessions: &SessionRegistry,
    provider: &dyn ContentProvider,
    collection: &PlanetCollection,
) -> Result<CollectionChange<Vec<Planet>>, DomainError> {
    info!(
        correlation_id = %command.correlation_id,
        count = command.count,
        "handling scan planets command"
    );
    sessions.get(command.session_id)?.require_admin()?;
    if command.count == 0 {
        return Err(DomainError::Validation("scan count must be at least 1".to_owned()));
    }

    let planets = provider.generate_planets(command.count).await;
    if planets.is_empty() {
        warn!(correlation_id = %command.correlation_id, "scan produced no planets");
        return Ok(CollectionChange {
            value: planets,
            persisted: true,
        });
    }

    let write = collection.append(planets.clone());
    let persisted = settle(write, command.correlation_id).await;
    info!(
        correlation_id = %command.correlation_id,
        generated = planets.len(),
        persisted,
        "planets added to catalogue"
    );
    Ok(CollectionChange {
        value: planets,
        persisted,
    })
}

/// Handles the `ToggleVisibility` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::Unauthorized` or
/// `DomainError::PlanetNotFound`.
pub async fn handle_toggle_visibility(
    command: &ToggleVisibility,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<CollectionChange<Planet>, DomainError> {
    info!(
        correlation_id = %command.correlation_id,
        planet_id = %command.planet_id,
        "handling toggle visibility command"
    );
    sessions.get(command.session_id)?.require_admin()?;

    let (planet, write) = collection.update(|planets| {
        let mut next = planets.to_vec();
        let planet = next
            .iter_mut()
            .find(|p| p.id == command.planet_id)
            .ok_or_else(|| DomainError::PlanetNotFound(command.planet_id.clone()))?;
        planet.is_visible = !planet.is_visible;
        let toggled = planet.clone();
        Ok((next, toggled))
    })?;

    let persisted = settle(write, command.correlation_id).await;
    Ok(CollectionChange {
        value: planet,
        persisted,
    })
}

/// Handles the `DeletePlanet` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::Unauthorized` or
/// `DomainError::PlanetNotFound`.
pub async fn handle_delete_planet(
    command: &DeletePlanet,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<CollectionChange<Planet>, DomainError> {
    info!(
        correlation_id = %command.correlation_id,
        planet_id = %command.planet_id,
        "handling delete planet command"
    );
    sessions.get(command.session_id)?.require_admin()?;

    let (removed, write) = collection.remove_planet(&command.planet_id)?;
    let persisted = settle(write, command.correlation_id).await;
    Ok(CollectionChange {
        value: removed,
        persisted,
    })
}

/// Handles the `VisitSector` command: evaluates the trigger policy and, on a
/// fresh positive roll, requests an encounter and attaches it.
///
/// The trigger marker is recorded before the provider is called. The
/// encounter is attached against the latest collection snapshot; it never
/// replaces an encounter that is already there, and it is dropped if the
/// planet was deleted while the request was in flight.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound` (also
/// for hidden planets seen by explorers) or `DomainError::SectorNotFound`.
pub async fn handle_visit_sector(
    command: &VisitSector,
    sessions: &SessionRegistry,
    rng: &Mutex<dyn DeterministicRng + Send>,
    provider: &dyn ContentProvider,
    collection: &PlanetCollection,
) -> Result<SectorVisit, DomainError> {
    let session = sessions.get(command.session_id)?;
    let planet = visible_planet(collection, &session, &command.planet_id)?;

    let decision = sessions.with_session(command.session_id, |session| {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        trigger::evaluate(&mut session.markers, &planet, command.sector_index, &mut *rng)
    })?;
    info!(
        correlation_id = %command.correlation_id,
        planet_id = %command.planet_id,
        sector_index = command.sector_index,
        ?decision,
        "sector visited"
    );

    let mut encounter_spawned = false;
    let mut persisted = None;
    if decision.spawn_requested() {
        match provider.generate_encounter().await {
            Some(generated) => {
                match attach_encounter(
                    collection,
                    &command.planet_id,
                    command.sector_index,
                    generated,
                ) {
                    Ok((entity, write)) => {
                        info!(
                            correlation_id = %command.correlation_id,
                            entity = %entity,
                            "encounter attached"
                        );
                        encounter_spawned = true;
                        persisted = Some(settle(write, command.correlation_id).await);
                    }
                    Err(e) => warn!(
                        correlation_id = %command.correlation_id,
                        error = %e,
                        "generated encounter discarded"
                    ),
                }
            }
            None => warn!(
                correlation_id = %command.correlation_id,
                "encounter generation failed; sector stays empty for this session"
            ),
        }
    }

    let latest = collection.planet(&command.planet_id).unwrap_or(planet);
    let session = sessions.get(command.session_id)?;
    Ok(SectorVisit {
        view: sector_view(&latest, command.sector_index, &session)?,
        decision,
        encounter_spawned,
        persisted,
    })
}

fn attach_encounter(
    collection: &PlanetCollection,
    planet_id: &str,
    sector_index: usize,
    encounter: Encounter,
) -> Result<(String, PendingWrite), DomainError> {
    collection.update(|planets| {
        modify_sector(planets, planet_id, sector_index, |sector| {
            if sector.encounter.is_some() {
                return Err(DomainError::InvalidTransition(format!(
                    "sector {} already has an encounter",
                    sector.id
                )));
            }
            let entity = encounter.entity_name.clone();
            sector.encounter = Some(encounter);
            Ok(entity)
        })
    })
}

/// Handles the `ExamineDiscoveryPoint` command. Discoveries are session
/// state; nothing is persisted.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound`,
/// `DomainError::SectorNotFound`, or `DomainError::Validation` for an unknown
/// point.
pub fn handle_examine_discovery_point(
    command: &ExamineDiscoveryPoint,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<Discovery, DomainError> {
    let session = sessions.get(command.session_id)?;
    let planet = visible_planet(collection, &session, &command.planet_id)?;
    let sector = planet
        .sectors
        .get(command.sector_index)
        .ok_or_else(|| DomainError::SectorNotFound {
            planet_id: planet.id.clone(),
            sector_index: command.sector_index,
        })?;
    let point = sector
        .discovery_point(&command.point_id)
        .cloned()
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "sector {} has no discovery point {}",
                sector.id, command.point_id
            ))
        })?;

    let first_time = sessions.with_session(command.session_id, |session| {
        Ok(session.discover(&sector.id, &point.id))
    })?;
    info!(
        correlation_id = %command.correlation_id,
        point_id = %point.id,
        category = point.icon_type.as_str(),
        first_time,
        "discovery point examined"
    );
    Ok(Discovery { point, first_time })
}

/// Handles the `SubmitChoice` command: applies the chosen option to the
/// sector's encounter and writes the planet back.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound`,
/// `DomainError::SectorNotFound`, or `DomainError::InvalidTransition` when the
/// sector has no encounter or the choice is rejected. A rejected choice
/// changes nothing.
pub async fn handle_submit_choice(
    command: &SubmitChoice,
    sessions: &SessionRegistry,
    collection: &PlanetCollection,
) -> Result<CollectionChange<Encounter>, DomainError> {
    let session = sessions.get(command.session_id)?;
    visible_planet(collection, &session, &command.planet_id)?;

    let (updated, write) = collection.update(|planets| {
        modify_sector(planets, &command.planet_id, command.sector_index, |sector| {
            let current = sector.encounter.as_ref().ok_or_else(|| {
                DomainError::InvalidTransition(format!("sector {} has no encounter", sector.id))
            })?;
            let next = encounter::choose(current, command.choice_index)?;
            sector.encounter = Some(next.clone());
            Ok(next)
        })
    })?;
    info!(
        correlation_id = %command.correlation_id,
        step = %updated.current_step_id,
        history = updated.history.len(),
        completed = updated.is_completed,
        "encounter choice accepted"
    );

    let persisted = settle(write, command.correlation_id).await;
    Ok(CollectionChange {
        value: updated,
        persisted,
    })
}

fn log_id(clock: &dyn Clock) -> Uuid {
    let now = clock.now();
    let seconds = u64::try_from(now.timestamp()).unwrap_or_default();
    Uuid::new_v7(Timestamp::from_unix(
        NoContext,
        seconds,
        now.timestamp_subsec_nanos(),
    ))
}

/// Handles the `WriteLog` command. The new log goes to the front of the list.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::PlanetNotFound`,
/// `DomainError::Validation` for blank content, or the store's error.
pub async fn handle_write_log(
    command: &WriteLog,
    sessions: &SessionRegistry,
    clock: &dyn Clock,
    collection: &PlanetCollection,
    logs: &dyn LogRepository,
) -> Result<ExplorationLog, DomainError> {
    info!(
        correlation_id = %command.correlation_id,
        planet_id = %command.planet_id,
        "handling write log command"
    );
    let session = sessions.get(command.session_id)?;
    let planet = visible_planet(collection, &session, &command.planet_id)?;
    let content = command.content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation("log content must not be blank".to_owned()));
    }

    let log = ExplorationLog {
        id: log_id(clock).to_string(),
        planet_id: planet.id,
        planet_name: planet.name,
        author: session.nickname,
        content: content.to_owned(),
        timestamp: clock.now_millis(),
        is_visible: true,
    };

    let existing = logs.load_logs().await?;
    let mut next = Vec::with_capacity(existing.len() + 1);
    next.push(log.clone());
    next.extend(existing);
    logs.save_logs(&next).await?;

    Ok(log)
}

/// Handles the `DeleteLog` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::LogNotFound`,
/// `DomainError::Unauthorized` for another explorer's log, or the store's
/// error.
pub async fn handle_delete_log(
    command: &DeleteLog,
    sessions: &SessionRegistry,
    logs: &dyn LogRepository,
) -> Result<ExplorationLog, DomainError> {
    info!(
        correlation_id = %command.correlation_id,
        log_id = %command.log_id,
        "handling delete log command"
    );
    let session = sessions.get(command.session_id)?;

    let mut existing = logs.load_logs().await?;
    let position = existing
        .iter()
        .position(|l| l.id == command.log_id)
        .ok_or_else(|| DomainError::LogNotFound(command.log_id.clone()))?;
    if !session.can_see_log(&existing[position]) {
        return Err(DomainError::Unauthorized(
            "logs can only be deleted by their author or an admin".to_owned(),
        ));
    }
    let removed = existing.remove(position);
    logs.save_logs(&existing).await?;

    Ok(removed)
}
