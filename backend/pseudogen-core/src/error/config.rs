use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Validation Error: {reason}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Missing Credential: environment variable {variable} is not set")]
    MissingCredential {
        location: ErrorLocation,
        variable: String,
    },

    #[error("Invalid Credential: {variable} {reason}")]
    InvalidCredential {
        location: ErrorLocation,
        variable: String,
        reason: String,
    },
}

impl ConfigError {
    /// Where the failure was raised.
    pub fn location(&self) -> ErrorLocation {
        match self {
            ConfigError::ReadError { location, .. }
            | ConfigError::ParseError { location, .. }
            | ConfigError::ValidationError { location, .. }
            | ConfigError::MissingCredential { location, .. }
            | ConfigError::InvalidCredential { location, .. } => *location,
        }
    }

    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            location: ErrorLocation::caller(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn missing_credential(variable: impl Into<String>) -> Self {
        ConfigError::MissingCredential {
            location: ErrorLocation::caller(),
            variable: variable.into(),
        }
    }

    #[track_caller]
    pub fn invalid_credential(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidCredential {
            location: ErrorLocation::caller(),
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}
