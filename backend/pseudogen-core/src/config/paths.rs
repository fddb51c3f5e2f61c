//! Config file lookup.
//!
//! Lookup order:
//! 1. `--config <path>` (must exist)
//! 2. `PSEUDOGEN_CONFIG` environment variable (must exist)
//! 3. Platform config directory via `dirs` (used only if present)
//!
//! Returns `Ok(None)` when no file applies; defaults are used then.

use crate::config::Environment;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::debug;

pub const CONFIG_PATH_ENV: &str = "PSEUDOGEN_CONFIG";
const CONFIG_DIR_NAME: &str = "pseudogen";
const CONFIG_FILE_NAME: &str = "config.toml";

/// How the config path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathSource {
    CommandLine,
    EnvVar,
    PlatformDefault,
}

impl std::fmt::Display for ConfigPathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigPathSource::CommandLine => write!(f, "--config"),
            ConfigPathSource::EnvVar => write!(f, "{CONFIG_PATH_ENV}"),
            ConfigPathSource::PlatformDefault => write!(f, "platform default"),
        }
    }
}

/// `<config dir>/pseudogen/config.toml`, if the platform has a config dir.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Find the config file for this run.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if an explicitly named file does not exist.
pub fn locate_config_file(
    explicit: Option<&Path>,
    env: &dyn Environment,
) -> Result<Option<(PathBuf, ConfigPathSource)>, ConfigError> {
    if let Some(path) = explicit {
        require_exists(path)?;
        return Ok(Some((path.to_path_buf(), ConfigPathSource::CommandLine)));
    }

    if let Some(custom) = env.var(CONFIG_PATH_ENV).filter(|v| !v.trim().is_empty()) {
        let path = PathBuf::from(custom);
        require_exists(&path)?;
        return Ok(Some((path, ConfigPathSource::EnvVar)));
    }

    match default_config_file() {
        Some(path) if path.is_file() => Ok(Some((path, ConfigPathSource::PlatformDefault))),
        Some(path) => {
            debug!("No config file at {}", path.display());
            Ok(None)
        }
        None => Ok(None),
    }
}

#[track_caller]
fn require_exists(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        return Ok(());
    }

    Err(ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: path.to_path_buf(),
        source: IoError::new(ErrorKind::NotFound, "config file does not exist"),
    })
}
