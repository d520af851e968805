//! Explorer sessions and the admin access gate.
//!
//! The admin gate is a static credential match, not a security boundary.

use std::collections::HashMap;

use lifeindex_core::error::DomainError;
use lifeindex_core::model::{ExplorationLog, Planet};
use uuid::Uuid;

use super::trigger::TriggerMarkers;

/// Access level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Sees visible planets and their own logs.
    Explorer,
    /// Sees everything and manages the catalogue.
    Admin,
}

impl AccessLevel {
    /// Wire name of the access level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explorer => "explorer",
            Self::Admin => "admin",
        }
    }
}

/// The static admin credential pair.
#[derive(Clone)]
pub struct AdminCredentials {
    id: String,
    password: String,
}

impl AdminCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }

    /// Whether `id` and `password` match exactly.
    #[must_use]
    pub fn matches(&self, id: &str, password: &str) -> bool {
        self.id == id && self.password == password
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("id", &self.id)
            .field("password", &"***")
            .finish()
    }
}

/// One explorer's session: identity, access level and session-scoped state.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    /// Session identifier.
    pub id: Uuid,
    /// The persona name.
    pub nickname: String,
    /// Current access level.
    pub access: AccessLevel,
    /// Encounter trigger markers, dropped with the session.
    pub markers: TriggerMarkers,
    discovered: HashMap<String, Vec<String>>,
}

impl ExplorerSession {
    /// Starts a session for `nickname`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the nickname is blank.
    pub fn start(id: Uuid, nickname: &str) -> Result<Self, DomainError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(DomainError::Validation("nickname must not be blank".to_owned()));
        }
        Ok(Self {
            id,
            nickname: nickname.to_owned(),
            access: AccessLevel::Explorer,
            markers: TriggerMarkers::default(),
            discovered: HashMap::new(),
        })
    }

    /// Whether the session has admin access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.access == AccessLevel::Admin
    }

    /// Upgrades to admin access if the credentials match.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` on mismatch or when no credentials
    /// are configured.
    pub fn login_admin(
        &mut self,
        id: &str,
        password: &str,
        credentials: Option<&AdminCredentials>,
    ) -> Result<(), DomainError> {
        match credentials {
            Some(expected) if expected.matches(id, password) => {
                self.access = AccessLevel::Admin;
                Ok(())
            }
            _ => Err(DomainError::Unauthorized(
                "admin credentials do not match".to_owned(),
            )),
        }
    }

    /// Drops back to explorer access.
    pub fn logout_admin(&mut self) {
        self.access = AccessLevel::Explorer;
    }

    /// Fails unless the session has admin access.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` for explorer sessions.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Unauthorized("admin access required".to_owned()))
        }
    }

    /// Whether this session may see `planet`.
    #[must_use]
    pub fn can_see_planet(&self, planet: &Planet) -> bool {
        planet.is_visible || self.is_admin()
    }

    /// Whether this session may see (and delete) `log`.
    #[must_use]
    pub fn can_see_log(&self, log: &ExplorationLog) -> bool {
        log.author == self.nickname || self.is_admin()
    }

    /// Records a discovery point as examined. Returns `false` if it already was.
    pub fn discover(&mut self, sector_id: &str, point_id: &str) -> bool {
        let seen = self.discovered.entry(sector_id.to_owned()).or_default();
        if seen.iter().any(|p| p == point_id) {
            return false;
        }
        seen.push(point_id.to_owned());
        true
    }

    /// Discovery point ids examined in a sector, in discovery order.
    #[must_use]
    pub fn discovered_in(&self, sector_id: &str) -> &[String] {
        self.discovered
            .get(sector_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
