use crate::helpers::{FixedCompleter, ThrottledCompleter, write_source};

use pseudogen::driver::{Driver, DriverState, Job};
use pseudogen::error::PseudogenError;

use pseudogen_core::SourceLoader;
use pseudogen_core::prompt::PSEUDOCODE_INSTRUCTION;

use std::time::Duration;

fn loader() -> SourceLoader {
    SourceLoader::new(Duration::from_secs(5)).unwrap()
}

fn job(source: &str) -> Job {
    Job {
        source: source.to_string(),
        output: None,
        model: None,
    }
}

/// **VALUE**: The whole pipeline writes exactly the completion plus a newline to `-o`.
///
/// **WHY THIS MATTERS**: This is the product. Anything extra in the file (logs,
/// the prompt, a missing newline) is a user-visible bug.
#[tokio::test]
async fn given_fixed_completion_when_converting_to_file_then_file_holds_text_and_newline() {
    // GIVEN: A source file, an output path, and a completer returning "X"
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "example.py", "print('hi')\n");
    let out = dir.path().join("out.txt");
    let mut job = job(&source.to_string_lossy());
    job.output = Some(out.clone());
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"));
    let mut stdout = Vec::new();

    // WHEN: Converting
    let result = driver.convert(&job, &mut stdout).await;

    // THEN: out.txt is "X\n", stdout untouched, driver ended in Success
    assert!(result.is_ok(), "got {result:?}");
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "X\n");
    assert!(stdout.is_empty());
    assert_eq!(driver.state(), DriverState::Success);
    assert_eq!(driver.completer().calls(), 1);
}

#[tokio::test]
async fn given_fixed_completion_when_converting_to_stdout_then_stdout_holds_text() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "example.py", "x = 1");
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"));
    let mut stdout = Vec::new();

    driver
        .convert(&job(&source.to_string_lossy()), &mut stdout)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(stdout).unwrap(), "X\n");
}

/// **VALUE**: The completer sees the selected model and the verbatim source.
#[tokio::test]
async fn given_model_flag_when_converting_then_request_uses_model_and_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "lib.rs", "fn add(a: i32, b: i32) -> i32 { a + b }");
    let mut job = job(&source.to_string_lossy());
    job.model = Some(String::from("gpt-4o-mini"));
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"));

    driver.convert(&job, &mut Vec::<u8>::new()).await.unwrap();

    let request = driver.completer().last_request().unwrap();
    assert_eq!(request.model, "gpt-4o-mini");
    assert!(request.prompt.starts_with(PSEUDOCODE_INSTRUCTION));
    assert!(request.prompt.ends_with("fn add(a: i32, b: i32) -> i32 { a + b }"));
}

#[tokio::test]
async fn given_config_default_model_when_no_flag_then_config_model_used() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "a.py", "pass");
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"))
        .with_default_model(Some(String::from("gpt-4")));

    driver
        .convert(&job(&source.to_string_lossy()), &mut Vec::<u8>::new())
        .await
        .unwrap();

    assert_eq!(driver.completer().last_request().unwrap().model, "gpt-4");
}

/// **VALUE**: Unknown models fail before any completion call or file read.
///
/// **BUG THIS CATCHES**: Would catch validation moving after the request, which
/// would spend a paid API call only to get a "model not found" back.
#[tokio::test]
async fn given_unknown_model_when_converting_then_fails_with_zero_completion_calls() {
    // GIVEN: A job naming a model that does not exist and a source that does not either
    let mut job = job("/definitely/not/here.py");
    job.model = Some(String::from("gpt-17"));
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"));
    let mut stdout = Vec::new();

    // WHEN: Converting
    let result = driver.convert(&job, &mut stdout).await;

    // THEN: Validation failure, nothing requested, nothing written
    assert!(matches!(result, Err(PseudogenError::Validation { .. })), "got {result:?}");
    assert_eq!(driver.completer().calls(), 0);
    assert!(stdout.is_empty());
    assert_eq!(
        driver.state(),
        DriverState::Failed {
            category: "validation"
        }
    );
}

#[tokio::test]
async fn given_missing_source_when_converting_then_input_error_and_no_call() {
    let mut driver = Driver::new(loader(), FixedCompleter::new("X"));

    let result = driver
        .convert(&job("/definitely/not/here.py"), &mut Vec::<u8>::new())
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 66);
    assert_eq!(driver.completer().calls(), 0);
}

/// **VALUE**: A failed completion never leaves an output file behind.
#[tokio::test]
async fn given_provider_failure_when_converting_to_file_then_no_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "a.py", "pass");
    let out = dir.path().join("out.txt");
    let mut job = job(&source.to_string_lossy());
    job.output = Some(out.clone());
    let mut driver = Driver::new(loader(), ThrottledCompleter);

    let result = driver.convert(&job, &mut Vec::<u8>::new()).await;

    assert!(matches!(result, Err(PseudogenError::Provider { .. })));
    assert!(!out.exists(), "No partial output on failure");
    assert_eq!(
        driver.state(),
        DriverState::Failed {
            category: "provider"
        }
    );
}
