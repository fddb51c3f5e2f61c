pub mod completion;
pub mod config;
pub mod input;
pub mod output;
pub mod registry;

pub use completion::CompletionError;
pub use config::ConfigError;
pub use input::InputError;
pub use output::OutputError;
pub use registry::RegistryError;

