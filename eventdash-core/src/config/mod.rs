//! Configuration types for eventdash.

mod dash_config;

pub use dash_config::{DEFAULT_API_URL, DashConfig};

use std::path::PathBuf;

use crate::error::{EventError, EventResult};

/// ~/.config/eventdash
pub fn config_dir() -> EventResult<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| EventError::Config("Could not determine config directory".into()))?
        .join("eventdash");
    Ok(dir)
}
