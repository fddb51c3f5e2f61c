use crate::cli::Cli;
use crate::driver::{DriverState, Job, list_models};
use crate::error::PseudogenError;

use pseudogen_core::ModelRegistry;

use clap::Parser;

#[test]
fn given_registry_when_listed_then_one_line_per_model_in_order() {
    // GIVEN: The builtin registry
    let registry = ModelRegistry::builtin();
    let mut stdout = Vec::new();

    // WHEN: Listing
    list_models(&registry, &mut stdout).unwrap();

    // THEN: Lines follow declaration order, default marked
    let text = String::from_utf8(stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), registry.list_all().len());
    for (line, model) in lines.iter().zip(registry.list_all()) {
        assert!(line.contains(model.identifier));
        assert!(line.contains(model.description));
    }
    assert!(lines[0].starts_with("* gpt-3.5-turbo"));
    assert!(lines[1].starts_with("  "));
}

#[test]
fn given_listing_twice_when_compared_then_identical() {
    let registry = ModelRegistry::builtin();
    let mut first = Vec::new();
    let mut second = Vec::new();

    list_models(&registry, &mut first).unwrap();
    list_models(&registry, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_cli_when_job_built_then_copies_arguments() {
    let cli = Cli::try_parse_from(["pseudogen", "a.py", "-o", "b.txt"]).unwrap();

    let job = Job::from_cli(&cli).unwrap();

    assert_eq!(job.source, "a.py");
    assert_eq!(job.output.as_deref(), Some(std::path::Path::new("b.txt")));
    assert!(job.model.is_none());
}

#[test]
fn given_cli_without_source_when_job_built_then_validation_error() {
    let cli = Cli::try_parse_from(["pseudogen", "--list-models"]).unwrap();

    let result = Job::from_cli(&cli);

    assert!(matches!(result, Err(PseudogenError::Validation { .. })));
}

#[test]
fn given_states_when_checked_then_only_success_and_failed_are_terminal() {
    assert!(!DriverState::Parsing.is_terminal());
    assert!(!DriverState::Loading.is_terminal());
    assert!(!DriverState::Requesting.is_terminal());
    assert!(!DriverState::Writing.is_terminal());
    assert!(DriverState::Success.is_terminal());
    assert!(DriverState::Failed { category: "input" }.is_terminal());
}
