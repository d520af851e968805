//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use lifeindex_content::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use lifeindex_exploration::domain::session::AdminCredentials;

use crate::error::AppError;

/// Remote content provider settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// API base URL.
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Everything `main` needs to assemble the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` URL. Without one the server keeps its data in memory.
    pub database_url: Option<String>,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Remote provider; `None` means local generation only.
    pub gemini: Option<GeminiConfig>,
    /// Admin credential pair; `None` disables admin login.
    pub admin: Option<AdminCredentials>,
    /// How long a session may sit unused before it is dropped.
    pub session_idle_timeout: Duration,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid port number,
    /// `SESSION_IDLE_MINUTES` is not a positive whole number, or only one half
    /// of the admin credential pair is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        let idle_minutes: u64 = match var("SESSION_IDLE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "SESSION_IDLE_MINUTES must be a positive whole number, got '{raw}'"
                    ))
                })?,
            None => 60,
        };

        let gemini = var("GEMINI_API_KEY").map(|api_key| GeminiConfig {
            api_key,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()),
        });

        let admin = match (var("ADMIN_ID"), var("ADMIN_PASSWORD")) {
            (Some(id), Some(password)) => Some(AdminCredentials::new(id, password)),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "ADMIN_ID and ADMIN_PASSWORD must be set together".to_owned(),
                ));
            }
        };

        Ok(Self {
            database_url: var("DATABASE_URL"),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            gemini,
            admin,
            session_idle_timeout: Duration::from_secs(idle_minutes * 60),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
