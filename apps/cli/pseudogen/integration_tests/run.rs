use crate::helpers::{TEST_API_KEY, completion_body, write_config, write_source};

use pseudogen::cli::Cli;
use pseudogen::driver::{self, SUCCESS_EXIT_CODE};

use std::collections::HashMap;

use clap::Parser;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct RunOutput {
    code: u8,
    stdout: String,
    stderr: String,
}

async fn run(args: &[&str], env: &HashMap<&str, &str>) -> RunOutput {
    let mut argv = vec!["pseudogen"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("valid arguments");

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = driver::run(&cli, env, &mut stdout, &mut stderr).await;

    RunOutput {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

fn env_with_key() -> HashMap<&'static str, &'static str> {
    HashMap::from([("OPENAI_API_KEY", TEST_API_KEY)])
}

/// **VALUE**: Happy path through the real client: stdout gets the text, stderr stays
/// empty, exit code 0.
#[tokio::test]
async fn given_provider_answers_when_running_then_stdout_only_and_exit_zero() {
    // GIVEN: A provider returning "X" and a local source file
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("X")))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let source = write_source(dir.path(), "example.py", "print('hi')");

    // WHEN: Running without -o
    let output = run(
        &[
            source.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        &env_with_key(),
    )
    .await;

    // THEN
    assert_eq!(output.code, SUCCESS_EXIT_CODE);
    assert_eq!(output.stdout, "X\n");
    assert_eq!(output.stderr, "");
}

/// **VALUE**: Without a credential the run stops before touching the source.
///
/// **BUG THIS CATCHES**: Would catch the credential check moving after the load,
/// which downloads (possibly large) URLs only to fail afterwards.
#[tokio::test]
async fn given_missing_credential_when_running_then_configuration_error_before_loading() {
    // GIVEN: A URL source that must not be fetched, and no API key
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x = 1"))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let source = format!("{}/example.py", server.uri());
    let env: HashMap<&str, &str> = HashMap::new();

    // WHEN: Running
    let output = run(&[source.as_str(), "--config", config.to_str().unwrap()], &env).await;

    // THEN: Configuration exit code, message on stderr, nothing on stdout
    assert_eq!(output.code, 78);
    assert!(output.stderr.starts_with("error: "), "stderr: {}", output.stderr);
    assert!(output.stderr.contains("OPENAI_API_KEY"));
    assert!(!output.stderr.contains(".rs:"), "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "");
}

/// **VALUE**: A 404 source is an input failure and the provider is never called.
#[tokio::test]
async fn given_url_returning_404_when_running_then_input_exit_code_and_no_completion() {
    // GIVEN: A server that 404s the source and counts completion calls
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.py"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("X")))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let source = format!("{}/missing.py", server.uri());

    // WHEN: Running
    let output = run(&[source.as_str(), "--config", config.to_str().unwrap()], &env_with_key()).await;

    // THEN
    assert_eq!(output.code, 66);
    assert!(output.stderr.contains("404"), "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "");
}

#[tokio::test]
async fn given_provider_rejects_key_when_running_then_provider_exit_code_and_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let source = write_source(dir.path(), "a.py", "pass");
    let out = dir.path().join("out.txt");

    let output = run(
        &[
            source.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ],
        &env_with_key(),
    )
    .await;

    assert_eq!(output.code, 69);
    assert!(output.stderr.contains("Incorrect API key provided"));
    assert!(!out.exists());
}

#[tokio::test]
async fn given_unknown_model_when_running_then_validation_exit_code_and_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("X")))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let source = write_source(dir.path(), "a.py", "pass");

    let output = run(
        &[
            source.to_str().unwrap(),
            "-m",
            "gpt-17",
            "-c",
            config.to_str().unwrap(),
        ],
        &env_with_key(),
    )
    .await;

    assert_eq!(output.code, 64);
    assert!(output.stderr.contains("gpt-17"));
}

/// **VALUE**: `--list-models` needs neither a key nor a source.
#[tokio::test]
async fn given_list_models_without_credential_when_running_then_prints_registry() {
    let env: HashMap<&str, &str> = HashMap::new();

    let output = run(&["--list-models", "-m", "ignored", "-o", "ignored.txt"], &env).await;

    assert_eq!(output.code, SUCCESS_EXIT_CODE);
    assert!(output.stdout.contains("gpt-3.5-turbo"));
    assert!(output.stdout.contains("gpt-4o"));
    assert_eq!(output.stderr, "");
}
