//! Commands for the Exploration context.

use lifeindex_core::command::Command;
use uuid::Uuid;

/// Command to start an explorer session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The persona name.
    pub nickname: String,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "exploration.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to end an explorer session and drop its markers.
#[derive(Debug, Clone)]
pub struct EndSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to end.
    pub session_id: Uuid,
}

impl Command for EndSession {
    fn command_type(&self) -> &'static str {
        "exploration.end_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to upgrade a session to admin access.
#[derive(Debug, Clone)]
pub struct LoginAdmin {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to upgrade.
    pub session_id: Uuid,
    /// The submitted admin id.
    pub admin_id: String,
    /// The submitted password.
    pub password: String,
}

impl Command for LoginAdmin {
    fn command_type(&self) -> &'static str {
        "exploration.login_admin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to drop a session back to explorer access.
#[derive(Debug, Clone)]
pub struct LogoutAdmin {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to downgrade.
    pub session_id: Uuid,
}

impl Command for LogoutAdmin {
    fn command_type(&self) -> &'static str {
        "exploration.logout_admin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to generate new planets and append them to the catalogue.
#[derive(Debug, Clone)]
pub struct ScanPlanets {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requesting (admin) session.
    pub session_id: Uuid,
    /// How many planets to request.
    pub count: usize,
}

impl Command for ScanPlanets {
    fn command_type(&self) -> &'static str {
        "exploration.scan_planets"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to flip a planet's visibility flag.
#[derive(Debug, Clone)]
pub struct ToggleVisibility {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requesting (admin) session.
    pub session_id: Uuid,
    /// The planet to toggle.
    pub planet_id: String,
}

impl Command for ToggleVisibility {
    fn command_type(&self) -> &'static str {
        "exploration.toggle_visibility"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a planet from the catalogue.
#[derive(Debug, Clone)]
pub struct DeletePlanet {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requesting (admin) session.
    pub session_id: Uuid,
    /// The planet to delete.
    pub planet_id: String,
}

impl Command for DeletePlanet {
    fn command_type(&self) -> &'static str {
        "exploration.delete_planet"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to enter a sector, rolling for an encounter if due.
#[derive(Debug, Clone)]
pub struct VisitSector {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The visiting session.
    pub session_id: Uuid,
    /// The planet being explored.
    pub planet_id: String,
    /// Index into the planet's sector sequence.
    pub sector_index: usize,
}

impl Command for VisitSector {
    fn command_type(&self) -> &'static str {
        "exploration.visit_sector"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to examine a discovery point in a sector.
#[derive(Debug, Clone)]
pub struct ExamineDiscoveryPoint {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The examining session.
    pub session_id: Uuid,
    /// The planet being explored.
    pub planet_id: String,
    /// Index into the planet's sector sequence.
    pub sector_index: usize,
    /// The discovery point to examine.
    pub point_id: String,
}

impl Command for ExamineDiscoveryPoint {
    fn command_type(&self) -> &'static str {
        "exploration.examine_discovery_point"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a choice in a sector's encounter.
#[derive(Debug, Clone)]
pub struct SubmitChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The acting session.
    pub session_id: Uuid,
    /// The planet being explored.
    pub planet_id: String,
    /// Index into the planet's sector sequence.
    pub sector_index: usize,
    /// Index into the current step's choices.
    pub choice_index: usize,
}

impl Command for SubmitChoice {
    fn command_type(&self) -> &'static str {
        "exploration.submit_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to write an exploration log for a planet.
#[derive(Debug, Clone)]
pub struct WriteLog {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authoring session.
    pub session_id: Uuid,
    /// The planet the log is about.
    pub planet_id: String,
    /// The log body.
    pub content: String,
}

impl Command for WriteLog {
    fn command_type(&self) -> &'static str {
        "exploration.write_log"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete an exploration log.
#[derive(Debug, Clone)]
pub struct DeleteLog {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requesting session.
    pub session_id: Uuid,
    /// The log to delete.
    pub log_id: String,
}

impl Command for DeleteLog {
    fn command_type(&self) -> &'static str {
        "exploration.delete_log"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
