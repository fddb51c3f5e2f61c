use common::ErrorLocation;

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum OutputError {
    #[error("Output Write Error: {path}: {source}")]
    File {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Stdout Write Error: {source}")]
    Stdout {
        location: ErrorLocation,
        #[source]
        source: IoError,
    },
}

impl OutputError {
    pub fn location(&self) -> ErrorLocation {
        match self {
            OutputError::File { location, .. }
            | OutputError::Stdout { location, .. } => *location,
        }
    }

    #[track_caller]
    pub fn file(path: impl Into<PathBuf>, source: IoError) -> Self {
        OutputError::File {
            path: path.into(),
            location: ErrorLocation::caller(),
            source,
        }
    }
}

impl From<IoError> for OutputError {
    #[track_caller]
    fn from(source: IoError) -> Self {
        OutputError::Stdout {
            location: ErrorLocation::caller(),
            source,
        }
    }
}
