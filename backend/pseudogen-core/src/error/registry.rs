use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("Unknown Model: '{identifier}' (available: {})", .available.join(", "))]
    UnknownModel {
        identifier: String,
        available: Vec<&'static str>,
        location: ErrorLocation,
    },
}

impl RegistryError {
    pub fn location(&self) -> ErrorLocation {
        match self {
            RegistryError::UnknownModel { location, .. } => *location,
        }
    }

    #[track_caller]
    pub fn unknown_model(identifier: impl Into<String>, available: Vec<&'static str>) -> Self {
        RegistryError::UnknownModel {
            identifier: identifier.into(),
            available,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
