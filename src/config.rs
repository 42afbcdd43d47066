use std::env;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-wide settings, read once at startup and passed into `main`'s
/// wiring. Nothing below the router reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL connection string. In-memory storage is used when unset.
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `.env` from the working directory (if any), then the environment.
    pub fn load() -> Self {
        Self::load_from(Path::new(".env"))
    }

    /// Variables already set in the process take precedence over the file.
    pub fn load_from(env_file: &Path) -> Self {
        match dotenv::from_path(env_file) {
            Ok(()) => debug!(path = %env_file.display(), "Loaded environment file"),
            Err(err) if err.not_found() => {
                debug!(path = %env_file.display(), "No environment file found")
            }
            Err(err) => warn!(
                path = %env_file.display(),
                error = %err,
                "Ignoring unreadable environment file"
            ),
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            database_url: non_empty("DATABASE_URL"),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
