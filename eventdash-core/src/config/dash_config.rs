//! Global eventdash configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::banner::DEFAULT_MAX_BANNER_MB;
use crate::error::{EventError, EventResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_banner_mb() -> u64 {
    DEFAULT_MAX_BANNER_MB
}

/// Configuration at ~/.config/eventdash/config.toml
///
/// The API token is not stored here; see [`crate::credential::CredentialFile`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// IANA zone name used for "start of day". Falls back to the system
    /// zone, then UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_banner_mb")]
    pub max_banner_mb: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        DashConfig {
            api_url: default_api_url(),
            timezone: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_banner_mb: DEFAULT_MAX_BANNER_MB,
        }
    }
}

impl DashConfig {
    pub fn config_path() -> EventResult<PathBuf> {
        Ok(super::config_dir()?.join("config.toml"))
    }

    /// Load from the default location, then apply `EVENTDASH_API_URL`.
    pub fn load() -> EventResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_api_url_override(std::env::var("EVENTDASH_API_URL").ok().as_deref());
        Ok(config)
    }

    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> EventResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EventError::Config(e.to_string()))
    }

    pub fn apply_api_url_override(&mut self, api_url: Option<&str>) {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_url = url.to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timezone used for day boundaries.
    pub fn timezone(&self) -> EventResult<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| EventError::Config(format!("Unknown timezone '{}'", name))),
            None => Ok(system_timezone()),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventResult<()> {
        let contents = format!(
            "\
# eventdash configuration

# Events API base URL:
# api_url = \"{}\"

# Timezone for grouping events by day (defaults to the system timezone):
# timezone = \"Asia/Ho_Chi_Minh\"

# Request timeout in seconds:
# request_timeout_secs = {}

# Largest banner image accepted, in MB:
# max_banner_mb = {}
",
            DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_MAX_BANNER_MB
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn system_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}
