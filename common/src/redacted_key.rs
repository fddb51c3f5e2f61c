//! Provider credential with redacted Debug/Display output.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// An API key that never exposes its value in logs, panics or error messages.
///
/// The value is zeroized when dropped.
#[derive(Clone)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    /// Wrap a raw key. Surrounding whitespace (a common `.env` artefact) is
    /// stripped before the value is stored.
    pub fn new(key: String) -> Self {
        let mut key = key;
        let trimmed = key.trim();
        if trimmed.len() != key.len() {
            let owned = trimmed.to_string();
            key.zeroize();
            key = owned;
        }
        Self { inner: key }
    }

    /// The actual key value, for the `Authorization` header only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Key length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED; {} chars])", self.inner.len())
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for RedactedApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedApiKey {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedApiKey cannot be serialized - use expose() explicitly"),
            location: ErrorLocation::caller(),
        }))
    }
}
