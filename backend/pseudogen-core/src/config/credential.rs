//! Provider credential loading.
//!
//! The key is read exactly once, checked for obvious mistakes such as blanks
//! or template placeholders, and wrapped in a [`RedactedApiKey`] before anything else can see it.

use crate::config::Environment;
use crate::error::config::ConfigError;

use common::RedactedApiKey;

use std::path::PathBuf;

use log::{info, warn};

/// Load `.env` from the working directory or one of its parents and return
/// the file that was applied.
///
/// A missing file is normal. Variables already set in the process
/// environment are not overridden.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Failed to parse .env: {}", e);
            None
        }
    }
}

/// Read the credential from `variable`.
///
/// Only obvious mistakes are caught here; whether the key is actually valid is
/// for the provider to decide.
///
/// # Errors
///
/// - [`ConfigError::MissingCredential`] if the variable is unset
/// - [`ConfigError::InvalidCredential`] if it is blank, a template
///   placeholder, or contains whitespace or non-printable characters
pub fn load_credential(
    variable: &str,
    env: &dyn Environment,
) -> Result<RedactedApiKey, ConfigError> {
    let Some(value) = env.var(variable) else {
        return Err(ConfigError::missing_credential(variable));
    };

    let key = RedactedApiKey::new(value);

    if key.is_empty() {
        return Err(ConfigError::invalid_credential(variable, "is empty"));
    }

    if let Some(pattern) = detect_placeholder(key.expose()) {
        return Err(ConfigError::invalid_credential(
            variable,
            format!("looks like a placeholder ({pattern})"),
        ));
    }

    if !is_valid_key_chars(key.expose()) {
        return Err(ConfigError::invalid_credential(
            variable,
            "contains whitespace or non-printable characters",
        ));
    }

    info!("Found API key in {} ({} chars)", variable, key.len());
    Ok(key)
}

/// Values copied verbatim from `.env.example` files.
const PLACEHOLDERS: &[&str] = &[
    "your-api-key",
    "your_api_key",
    "your-api-key-here",
    "your_api_key_here",
    "your-key-here",
    "api-key-here",
    "placeholder",
    "changeme",
    "change-me",
    "replace-me",
];

/// Match the whole value, never a substring: real keys are random and may
/// contain any run of characters.
fn detect_placeholder(key: &str) -> Option<&'static str> {
    let lower = key.to_ascii_lowercase();

    if let Some(pattern) = PLACEHOLDERS.iter().copied().find(|p| *p == lower) {
        return Some(pattern);
    }

    if lower.starts_with('<') && lower.ends_with('>') {
        return Some("<...>");
    }

    let body = lower.strip_prefix("sk-").unwrap_or(&lower);
    if !body.is_empty() && body.chars().all(|c| c == 'x') {
        return Some("xxx");
    }
    if !body.is_empty() && body.chars().all(|c| c == '.') {
        return Some("...");
    }

    None
}

/// Any visible ASCII; rules out pasted whitespace, newlines and smart quotes.
fn is_valid_key_chars(key: &str) -> bool {
    key.chars().all(|c| c.is_ascii_graphic())
}
