use crate::error::RegistryError;
use crate::registry::{DEFAULT_MODEL, ModelRegistry};

/// **VALUE**: The default identifier must always resolve.
///
/// **BUG THIS CATCHES**: Would catch someone removing or renaming the default
/// entry in the table, which would make every run without `-m` fail validation.
#[test]
fn given_builtin_registry_when_resolving_default_then_succeeds() {
    let registry = ModelRegistry::builtin();

    let model = registry.resolve_or_default(None).unwrap();

    assert_eq!(model.identifier, DEFAULT_MODEL);
    assert_eq!(registry.default_model().identifier, DEFAULT_MODEL);
    assert!(registry.is_default(model));
}

#[test]
fn given_known_identifier_when_resolved_then_returns_descriptor() {
    let registry = ModelRegistry::builtin();

    let model = registry.resolve("gpt-4o").unwrap();

    assert_eq!(model.display_name, "GPT-4o");
    assert!(!model.description.is_empty());
}

/// **VALUE**: Unknown identifiers are rejected with the list of valid ones.
///
/// **WHY THIS MATTERS**: The error is the only help a user gets for a typo.
#[test]
fn given_unknown_identifier_when_resolved_then_lists_available_models() {
    // GIVEN: A registry
    let registry = ModelRegistry::builtin();

    // WHEN: Resolving a typo
    let result = registry.resolve("gpt-5-turbo-ultra");

    // THEN: UnknownModel naming the identifier and the known ones
    let err = result.unwrap_err();
    let RegistryError::UnknownModel {
        ref identifier,
        ref available,
        ..
    } = err;
    assert_eq!(identifier, "gpt-5-turbo-ultra");
    assert!(available.contains(&DEFAULT_MODEL));

    let message = err.to_string();
    assert!(message.contains("gpt-5-turbo-ultra"));
    assert!(message.contains("gpt-4o-mini"));
}

#[test]
fn given_identifier_with_different_case_when_resolved_then_rejected() {
    let registry = ModelRegistry::builtin();

    assert!(registry.resolve("GPT-4O").is_err());
    assert!(registry.resolve("").is_err());
}

/// **VALUE**: Listing is idempotent and order-stable.
#[test]
fn given_registry_when_listed_twice_then_same_order() {
    let registry = ModelRegistry::builtin();

    let first: Vec<_> = registry.list_all().iter().map(|m| m.identifier).collect();
    let second: Vec<_> = registry.list_all().iter().map(|m| m.identifier).collect();

    assert_eq!(first, second);
    assert_eq!(first[0], DEFAULT_MODEL, "Default is declared first");
    assert_eq!(first.len(), 5);
}

#[test]
fn given_registry_when_listed_then_identifiers_are_unique() {
    let models = ModelRegistry::builtin().list_all();

    for (i, model) in models.iter().enumerate() {
        assert!(
            models[i + 1..].iter().all(|m| m.identifier != model.identifier),
            "Duplicate identifier: {}",
            model.identifier
        );
    }
}
