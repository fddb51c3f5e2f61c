//! Source-to-pseudocode pipeline.
//!
//! Components, in the order a run uses them:
//!
//! - [`config`]: credential, endpoint and defaults
//! - [`registry`]: the static table of supported models
//! - [`input`]: read a local file or download a URL
//! - [`prompt`]: wrap the source in the instruction template
//! - [`completion`]: one chat-completion request to the provider
//! - [`output`]: write the answer to stdout or a file

pub mod completion;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod prompt;
pub mod registry;

#[cfg(test)]
mod tests;

pub use completion::{ChatCompletionClient, CompletionResult, Completer};
pub use config::{Environment, ProcessEnvironment, Settings};
pub use input::{SourceDocument, SourceLoader};
pub use prompt::CompletionRequest;
pub use registry::{ModelDescriptor, ModelRegistry};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1/";
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const USER_AGENT: &str =
    const_format::concatcp!("pseudogen/", env!("CARGO_PKG_VERSION"));
