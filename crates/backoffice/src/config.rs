//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{BackofficeError, Result};

/// Default admin API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the base URL.
pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "BACKOFFICE_TIMEOUT_SECS";

/// Environment variable overriding the session file location.
pub const ENV_SESSION_FILE: &str = "BACKOFFICE_SESSION_FILE";

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin API, including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Where the session token is persisted.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `BACKOFFICE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.base_url = url;
        }

        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BackofficeError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
            config.session_file = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

/// `<config dir>/backoffice/session.json`, falling back to the working directory.
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("backoffice")
        .join("session.json")
}
