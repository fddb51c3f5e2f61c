//! Run configuration: provider endpoint, credential, timeout and default model.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. TOML config file (see [`paths`] for lookup order)
//! 3. Environment (`PSEUDOGEN_BASE_URL`, and the credential variable)
//!
//! The result is a [`Settings`] value that is handed to the clients
//! explicitly. Nothing reads the environment after startup.

pub mod credential;
pub mod paths;

pub use credential::{load_credential, load_dotenv};
pub use paths::{ConfigPathSource, locate_config_file};

use crate::error::config::ConfigError;
use crate::{DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV};

use common::{ErrorLocation, RedactedApiKey};

use std::collections::HashMap;
use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

const CONFIG_VERSION: u32 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_TIMEOUT_SECS: u64 = 600;

pub const BASE_URL_ENV: &str = "PSEUDOGEN_BASE_URL";

// ============================================
// ENVIRONMENT ACCESS
// ============================================

/// Read access to environment variables.
///
/// Lets tests supply variables without touching the process environment.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

// ============================================
// CONFIG FILE STRUCTS
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsSection {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub provider: ProviderSection,

    #[serde(default)]
    pub defaults: DefaultsSection,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            provider: ProviderSection::default(),
            defaults: DefaultsSection::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ============================================
// IMPLEMENTATION
// ============================================

impl FileConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML
    /// for this schema, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&contents, path)?;

        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Parse config text; `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::validation(format!(
                "Invalid version: {} (expected 1-{})",
                self.version, CONFIG_VERSION
            )));
        }

        parse_base_url(&self.provider.base_url)?;

        if self.provider.timeout_secs == 0 || self.provider.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::validation(format!(
                "Invalid timeout_secs: {} (must be 1-{})",
                self.provider.timeout_secs, MAX_TIMEOUT_SECS
            )));
        }

        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::validation("api_key_env cannot be empty"));
        }

        if let Some(ref model) = self.defaults.model {
            if model.trim().is_empty() {
                return Err(ConfigError::validation("defaults.model cannot be empty string"));
            }
        }

        Ok(())
    }
}

/// Parse the provider base URL, requiring http(s) and a trailing slash so
/// endpoint paths join underneath it rather than replacing its last segment.
#[track_caller]
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(ConfigError::validation(format!("Invalid URL format: {raw}")));
    }

    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized)
        .map_err(|e| ConfigError::validation(format!("Invalid URL {raw}: {e}")))
}

/// Everything a run needs from configuration, resolved once.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub api_key: RedactedApiKey,
    pub timeout: Duration,
    pub default_model: Option<String>,
}

impl Settings {
    /// Resolve settings from an optional config file and the environment.
    ///
    /// `config_path` is an explicit `--config`; when absent the usual lookup
    /// in [`locate_config_file`] applies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file is unreadable or invalid,
    /// or the credential is missing or implausible.
    pub fn resolve(
        config_path: Option<&Path>,
        env: &dyn Environment,
    ) -> Result<Self, ConfigError> {
        let file_config = match locate_config_file(config_path, env)? {
            Some((path, source)) => {
                debug!("Using config file {} ({source})", path.display());
                FileConfig::load(&path)?
            }
            None => {
                debug!("No config file found, using defaults");
                FileConfig::default()
            }
        };

        Self::from_file_config(file_config, env)
    }

    /// Apply environment overrides to an already-loaded file config.
    pub fn from_file_config(
        file_config: FileConfig,
        env: &dyn Environment,
    ) -> Result<Self, ConfigError> {
        let base_url = match env.var(BASE_URL_ENV) {
            Some(over) if !over.trim().is_empty() => {
                info!("Using {BASE_URL_ENV} override: {over}");
                parse_base_url(over.trim())?
            }
            _ => parse_base_url(&file_config.provider.base_url)?,
        };

        let api_key = load_credential(&file_config.provider.api_key_env, env)?;

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(file_config.provider.timeout_secs),
            default_model: file_config.defaults.model,
        })
    }
}
