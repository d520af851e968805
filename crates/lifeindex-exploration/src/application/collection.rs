//! The planet collection repository.
//!
//! `PlanetCollection` is the single source of truth for planets at runtime.
//! Readers get an immutable snapshot (`Arc<Vec<Planet>>`); writers compute a
//! whole new collection from the latest snapshot and swap it in under one
//! lock, so a reader never observes a mix of two writes.
//!
//! Durable writes are write-behind: each swapped-in snapshot is queued to a
//! background task that calls `PlanetRepository::replace_all` in order. The
//! in-memory state is updated immediately; callers await the returned
//! [`PendingWrite`] to learn whether the write reached storage.

use std::sync::{Arc, PoisonError, RwLock};

use lifeindex_core::error::DomainError;
use lifeindex_core::model::Planet;
use lifeindex_core::repository::PlanetRepository;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

struct PersistRequest {
    snapshot: Arc<Vec<Planet>>,
    ack: oneshot::Sender<Result<(), DomainError>>,
}

/// Acknowledgement handle for one queued durable write.
#[derive(Debug)]
#[must_use = "await `acknowledged` to learn whether the write reached storage"]
pub struct PendingWrite(oneshot::Receiver<Result<(), DomainError>>);

impl PendingWrite {
    /// Waits for the durable write to finish.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `DomainError::Infrastructure` if the
    /// persistence task is gone.
    pub async fn acknowledged(self) -> Result<(), DomainError> {
        self.0.await.map_err(|_| {
            DomainError::Infrastructure("planet persistence task stopped".to_owned())
        })?
    }
}

/// In-memory planet collection backed by a durable store.
pub struct PlanetCollection {
    snapshot: RwLock<Arc<Vec<Planet>>>,
    writer: mpsc::UnboundedSender<PersistRequest>,
}

impl std::fmt::Debug for PlanetCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanetCollection")
            .field("planets", &self.read().len())
            .finish_non_exhaustive()
    }
}

impl PlanetCollection {
    /// Loads the collection from `repo` and starts the persistence task.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the initial load fails.
    pub async fn load(repo: Arc<dyn PlanetRepository>) -> Result<Self, DomainError> {
        let planets = repo.load_all().await?;
        debug!(planets = planets.len(), "planet collection loaded");
        Ok(Self::with_planets(planets, repo))
    }

    /// Starts a collection with `planets` already in memory.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn with_planets(planets: Vec<Planet>, repo: Arc<dyn PlanetRepository>) -> Self {
        let (writer, requests) = mpsc::unbounded_channel();
        tokio::spawn(persist_snapshots(requests, repo));
        Self {
            snapshot: RwLock::new(Arc::new(planets)),
            writer,
        }
    }

    /// The current collection.
    #[must_use]
    pub fn read(&self) -> Arc<Vec<Planet>> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Looks up one planet in the current collection.
    #[must_use]
    pub fn planet(&self, planet_id: &str) -> Option<Planet> {
        self.read().iter().find(|p| p.id == planet_id).cloned()
    }

    /// Overwrites the whole collection.
    pub fn replace(&self, planets: Vec<Planet>) -> PendingWrite {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        self.swap(&mut guard, planets)
    }

    /// Read-modify-write against the latest snapshot.
    ///
    /// `mutate` receives the current planets and returns the replacement
    /// collection plus a value for the caller. If it fails nothing changes.
    ///
    /// # Errors
    ///
    /// Returns whatever `mutate` returns.
    pub fn update<T, F>(&self, mutate: F) -> Result<(T, PendingWrite), DomainError>
    where
        F: FnOnce(&[Planet]) -> Result<(Vec<Planet>, T), DomainError>,
    {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let (planets, value) = mutate(guard.as_slice())?;
        Ok((value, self.swap(&mut guard, planets)))
    }

    /// Replaces the planet with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PlanetNotFound` if the planet is no longer in the
    /// collection.
    pub fn replace_planet(&self, planet: Planet) -> Result<PendingWrite, DomainError> {
        self.update(|planets| {
            if !planets.iter().any(|p| p.id == planet.id) {
                return Err(DomainError::PlanetNotFound(planet.id.clone()));
            }
            let next = planets
                .iter()
                .map(|p| if p.id == planet.id { planet.clone() } else { p.clone() })
                .collect();
            Ok((next, ()))
        })
        .map(|((), write)| write)
    }

    /// Removes a planet, returning it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PlanetNotFound` if no planet has `planet_id`.
    pub fn remove_planet(&self, planet_id: &str) -> Result<(Planet, PendingWrite), DomainError> {
        self.update(|planets| {
            let removed = planets
                .iter()
                .find(|p| p.id == planet_id)
                .cloned()
                .ok_or_else(|| DomainError::PlanetNotFound(planet_id.to_owned()))?;
            let next = planets.iter().filter(|p| p.id != planet_id).cloned().collect();
            Ok((next, removed))
        })
    }

    /// Appends planets at the end of the collection.
    pub fn append(&self, planets: Vec<Planet>) -> PendingWrite {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.iter().cloned().chain(planets).collect();
        self.swap(&mut guard, next)
    }

    // Called with the write lock held so queue order matches swap order.
    fn swap(&self, current: &mut Arc<Vec<Planet>>, planets: Vec<Planet>) -> PendingWrite {
        let snapshot = Arc::new(planets);
        *current = Arc::clone(&snapshot);
        let (ack, pending) = oneshot::channel();
        if self.writer.send(PersistRequest { snapshot, ack }).is_err() {
            error!("planet persistence task stopped; change kept in memory only");
        }
        PendingWrite(pending)
    }
}

async fn persist_snapshots(
    mut requests: mpsc::UnboundedReceiver<PersistRequest>,
    repo: Arc<dyn PlanetRepository>,
) {
    while let Some(request) = requests.recv().await {
        let result = repo.replace_all(&request.snapshot).await;
        match &result {
            Ok(()) => debug!(planets = request.snapshot.len(), "planet collection persisted"),
            Err(e) => error!(
                error = %e,
                planets = request.snapshot.len(),
                "planet collection write failed; in-memory state is ahead of storage"
            ),
        }
        // The caller may have stopped waiting.
        let _ = request.ack.send(result);
    }
}
