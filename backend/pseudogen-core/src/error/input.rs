//! Errors raised while loading the source document.
//!
//! - Filesystem failures keep the offending path and the io::Error source
//! - Download failures keep the status code, never a parsed string

use common::{ErrorLocation, HttpStatusCode};

use std::io::{Error as IoError, ErrorKind};
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InputError {
    #[error("File Not Found: {path}")]
    NotFound {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Permission Denied: {path}")]
    PermissionDenied {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("File Read Error: {path}: {source}")]
    Read {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Decode Error: {origin} is not valid UTF-8")]
    Decode {
        origin: String,
        location: ErrorLocation,
    },

    #[error("Download Failed: {url}: HTTP {status_code}")]
    HttpStatus {
        url: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Network Error: {url}: {message}")]
    Network {
        url: String,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },
}

impl InputError {
    pub fn location(&self) -> ErrorLocation {
        match self {
            InputError::NotFound { location, .. }
            | InputError::PermissionDenied { location, .. }
            | InputError::Read { location, .. }
            | InputError::Decode { location, .. }
            | InputError::HttpStatus { location, .. }
            | InputError::Network { location, .. } => *location,
        }
    }

    /// Categorise a filesystem error by its kind.
    #[track_caller]
    pub fn from_io(path: impl Into<PathBuf>, error: IoError) -> Self {
        let path = path.into();
        let location = ErrorLocation::caller();

        match error.kind() {
            ErrorKind::NotFound => InputError::NotFound { path, location },
            ErrorKind::PermissionDenied => InputError::PermissionDenied { path, location },
            _ => InputError::Read {
                path,
                location,
                source: error,
            },
        }
    }

    /// Transport-level failure (connect, timeout, body read). Status codes are
    /// checked by the caller and reported through [`InputError::http_status`].
    #[track_caller]
    pub fn from_reqwest(url: impl Into<String>, error: &reqwest::Error) -> Self {
        InputError::Network {
            url: url.into(),
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn http_status(url: impl Into<String>, status_code: u16) -> Self {
        InputError::HttpStatus {
            url: url.into(),
            status_code: HttpStatusCode(status_code),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn decode(origin: impl Into<String>) -> Self {
        InputError::Decode {
            origin: origin.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// HTTP status code if the failure came from a download.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            InputError::HttpStatus { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}
