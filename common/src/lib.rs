//! Shared building blocks for pseudogen.
//!
//! Everything here is a leaf type with no knowledge of the pipeline:
//!
//! - [`ErrorLocation`]: call-site capture used by every error enum
//! - [`RedactedApiKey`]: the provider credential, safe to pass around and log
//! - [`HttpStatusCode`]: status categorisation for provider and download errors

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
