//! Error types for the chat-completion request.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Categories follow what the caller can do about them: fix the key,
//!   wait, check the network, or give up
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CompletionError {
    #[error("Authentication Failed: HTTP {status_code} - {message}")]
    Auth {
        message: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Rate Limited: {message}")]
    RateLimit {
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Provider Error: {message}")]
    Provider {
        message: String,
        status_code: Option<HttpStatusCode>,
        location: ErrorLocation,
    },

    #[error("Client Setup Error: {message}")]
    ClientSetup {
        message: String,
        location: ErrorLocation,
    },
}

impl CompletionError {
    /// Where the failure was raised.
    pub fn location(&self) -> ErrorLocation {
        match self {
            CompletionError::Auth { location, .. }
            | CompletionError::RateLimit { location, .. }
            | CompletionError::Network { location, .. }
            | CompletionError::Provider { location, .. }
            | CompletionError::ClientSetup { location, .. } => *location,
        }
    }

    /// Map a non-success HTTP response onto a category.
    #[track_caller]
    pub fn from_http_response(status_code: u16, message: impl Into<String>) -> Self {
        let status = HttpStatusCode(status_code);
        let message = message.into();
        let location = ErrorLocation::caller();

        if status.is_auth_rejected() {
            CompletionError::Auth {
                message,
                status_code: status,
                location,
            }
        } else if status.is_rate_limited() {
            CompletionError::RateLimit { message, location }
        } else {
            CompletionError::Provider {
                message: format!("HTTP {status} - {message}"),
                status_code: Some(status),
                location,
            }
        }
    }

    /// Transport-level failure (connect, timeout, body read).
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        CompletionError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::caller(),
        }
    }

    /// Success status but the body is not a usable completion.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        CompletionError::Provider {
            message: message.into(),
            status_code: None,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn client_setup(message: impl Into<String>) -> Self {
        CompletionError::ClientSetup {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Short category name used in logs.
    pub fn error_category(&self) -> &'static str {
        match self {
            CompletionError::Auth { .. } => "auth",
            CompletionError::RateLimit { .. } => "rate_limit",
            CompletionError::Network { is_timeout: true, .. } => "timeout",
            CompletionError::Network { is_connection: true, .. } => "connection",
            CompletionError::Network { .. } => "network",
            CompletionError::Provider { status_code: Some(status), .. }
                if status.is_server_error() =>
            {
                "server_error"
            }
            CompletionError::Provider { .. } => "provider",
            CompletionError::ClientSetup { .. } => "client_setup",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CompletionError::Auth { status_code, .. } => Some(status_code.0),
            CompletionError::RateLimit { .. } => Some(429),
            CompletionError::Provider { status_code, .. } => status_code.map(|s| s.0),
            _ => None,
        }
    }
}
