//! Static table of the chat models pseudogen knows how to address.
//!
//! The table is compiled in; there is no runtime registration. Identifiers
//! are validated here before any request is built, so a typo never costs a
//! network round trip.

use crate::error::RegistryError;

use log::debug;

/// Identifier used when neither the command line nor the config file names one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

impl ModelDescriptor {
    pub const fn new(
        identifier: &'static str,
        display_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            identifier,
            display_name,
            description,
        }
    }
}

// Declaration order is the listing order.
const MODELS: &[ModelDescriptor] = &[
    ModelDescriptor::new(
        DEFAULT_MODEL,
        "GPT-3.5 Turbo",
        "Fast and inexpensive; good for most single-file conversions",
    ),
    ModelDescriptor::new(
        "gpt-4o-mini",
        "GPT-4o mini",
        "Small GPT-4o tier; better structure than 3.5 at similar cost",
    ),
    ModelDescriptor::new(
        "gpt-4o",
        "GPT-4o",
        "Flagship multimodal model; best quality for dense code",
    ),
    ModelDescriptor::new(
        "gpt-4-turbo",
        "GPT-4 Turbo",
        "Large context window for long source files",
    ),
    ModelDescriptor::new(
        "gpt-4",
        "GPT-4",
        "Original GPT-4; slower and more expensive",
    ),
];

#[derive(Debug, Clone, Copy)]
pub struct ModelRegistry {
    models: &'static [ModelDescriptor],
    default_identifier: &'static str,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModelRegistry {
    pub const fn builtin() -> Self {
        Self {
            models: MODELS,
            default_identifier: DEFAULT_MODEL,
        }
    }

    /// Look up an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownModel`] if the identifier is not in the table.
    #[track_caller]
    pub fn resolve(&self, identifier: &str) -> Result<&'static ModelDescriptor, RegistryError> {
        let models = self.models;
        match models.iter().find(|m| m.identifier == identifier) {
            Some(model) => {
                debug!("Resolved model '{}' ({})", model.identifier, model.display_name);
                Ok(model)
            }
            None => Err(RegistryError::unknown_model(identifier, self.identifiers())),
        }
    }

    /// Resolve an optional identifier, falling back to the default entry.
    #[track_caller]
    pub fn resolve_or_default(
        &self,
        identifier: Option<&str>,
    ) -> Result<&'static ModelDescriptor, RegistryError> {
        match identifier {
            Some(identifier) => self.resolve(identifier),
            None => {
                let model = self.default_model();
                debug!("No model requested, using default '{}'", model.identifier);
                Ok(model)
            }
        }
    }

    /// Every descriptor, in declaration order.
    pub fn list_all(&self) -> &'static [ModelDescriptor] {
        self.models
    }

    pub fn default_model(&self) -> &'static ModelDescriptor {
        let models = self.models;
        models
            .iter()
            .find(|m| m.identifier == self.default_identifier)
            .unwrap_or(&models[0])
    }

    pub fn is_default(&self, model: &ModelDescriptor) -> bool {
        model.identifier == self.default_identifier
    }

    fn identifiers(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.identifier).collect()
    }
}
