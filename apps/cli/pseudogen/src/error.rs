use common::ErrorLocation;

use pseudogen_core::error::{CompletionError, ConfigError, InputError, OutputError, RegistryError};

use thiserror::Error;

/// Failure categories a run can end in.
///
/// Every core error is folded into one of these at the driver boundary. The
/// message is the core error's text, which is what the user sees; the
/// location is where the core error was raised and only reaches the log.
#[derive(Debug, Error)]
pub enum PseudogenError {
    /// Missing/invalid credential or config file
    #[error("Configuration Error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    /// Source file or URL could not be read
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    /// Unknown model identifier
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// Provider rejected, throttled, failed or returned garbage
    #[error("Provider Error: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
    },

    /// Destination could not be written
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl PseudogenError {
    /// Process exit code for this category (sysexits values).
    pub fn exit_code(&self) -> u8 {
        match self {
            PseudogenError::Validation { .. } => 64,
            PseudogenError::Input { .. } => 66,
            PseudogenError::Provider { .. } => 69,
            PseudogenError::Output { .. } => 73,
            PseudogenError::Configuration { .. } => 78,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            PseudogenError::Configuration { .. } => "configuration",
            PseudogenError::Input { .. } => "input",
            PseudogenError::Validation { .. } => "validation",
            PseudogenError::Provider { .. } => "provider",
            PseudogenError::Output { .. } => "output",
        }
    }

    /// User-facing text, without the source location.
    pub fn message(&self) -> &str {
        match self {
            PseudogenError::Configuration { message, .. }
            | PseudogenError::Input { message, .. }
            | PseudogenError::Validation { message, .. }
            | PseudogenError::Provider { message, .. }
            | PseudogenError::Output { message, .. } => message,
        }
    }
}

impl From<ConfigError> for PseudogenError {
    fn from(error: ConfigError) -> Self {
        PseudogenError::Configuration {
            message: error.to_string(),
            location: error.location(),
        }
    }
}

impl From<RegistryError> for PseudogenError {
    fn from(error: RegistryError) -> Self {
        PseudogenError::Validation {
            message: error.to_string(),
            location: error.location(),
        }
    }
}

impl From<InputError> for PseudogenError {
    fn from(error: InputError) -> Self {
        PseudogenError::Input {
            message: error.to_string(),
            location: error.location(),
        }
    }
}

impl From<CompletionError> for PseudogenError {
    fn from(error: CompletionError) -> Self {
        PseudogenError::Provider {
            message: error.to_string(),
            location: error.location(),
        }
    }
}

impl From<OutputError> for PseudogenError {
    fn from(error: OutputError) -> Self {
        PseudogenError::Output {
            message: error.to_string(),
            location: error.location(),
        }
    }
}
