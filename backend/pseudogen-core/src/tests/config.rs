use crate::config::{BASE_URL_ENV, FileConfig, Settings, load_credential, locate_config_file};
use crate::error::ConfigError;

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

const VALID_KEY: &str = "sk-test0123456789abcdef";

fn env_with_key() -> HashMap<&'static str, &'static str> {
    HashMap::from([("OPENAI_API_KEY", VALID_KEY)])
}

#[test]
fn given_empty_config_when_parsed_then_defaults_apply() {
    let config = FileConfig::parse("", Path::new("config.toml")).unwrap();

    assert_eq!(config.version, 1);
    assert_eq!(config.provider.base_url, "https://api.openai.com/v1/");
    assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
    assert_eq!(config.provider.timeout_secs, 60);
    assert!(config.defaults.model.is_none());
}

#[test]
fn given_full_config_when_parsed_then_fields_are_read() {
    let text = r#"
        version = 1

        [provider]
        base_url = "http://localhost:8080/v1"
        api_key_env = "LOCAL_LLM_KEY"
        timeout_secs = 5

        [defaults]
        model = "gpt-4o"
    "#;

    let config = FileConfig::parse(text, Path::new("config.toml")).unwrap();

    assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
    assert_eq!(config.provider.api_key_env, "LOCAL_LLM_KEY");
    assert_eq!(config.provider.timeout_secs, 5);
    assert_eq!(config.defaults.model.as_deref(), Some("gpt-4o"));
}

/// **VALUE**: Invalid config values are rejected rather than silently used.
#[test]
fn given_invalid_values_when_parsed_then_validation_error() {
    let cases = [
        "version = 2",
        "version = 0",
        "[provider]\nbase_url = \"ftp://example.com\"",
        "[provider]\ntimeout_secs = 0",
        "[provider]\ntimeout_secs = 601",
        "[provider]\napi_key_env = \" \"",
        "[defaults]\nmodel = \"\"",
    ];

    for text in cases {
        let result = FileConfig::parse(text, Path::new("config.toml"));
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected validation error for {text:?}, got {result:?}"
        );
    }
}

#[test]
fn given_malformed_toml_when_parsed_then_parse_error_names_path() {
    let result = FileConfig::parse("[provider\nbase_url = ", Path::new("broken.toml"));

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

/// **VALUE**: Base URLs without a trailing slash still keep their path.
///
/// **BUG THIS CATCHES**: `Url::join("chat/completions")` on `.../v1` replaces `v1`,
/// sending every request to `/chat/completions` on the wrong path.
#[test]
fn given_base_url_without_trailing_slash_when_resolved_then_slash_added() {
    let mut config = FileConfig::default();
    config.provider.base_url = String::from("https://llm.internal/openai/v1");

    let settings = Settings::from_file_config(config, &env_with_key()).unwrap();

    assert_eq!(settings.base_url.as_str(), "https://llm.internal/openai/v1/");
    assert_eq!(
        settings.base_url.join("chat/completions").unwrap().path(),
        "/openai/v1/chat/completions"
    );
}

#[test]
fn given_base_url_env_override_when_resolved_then_override_wins() {
    let env = HashMap::from([
        ("OPENAI_API_KEY", VALID_KEY),
        (BASE_URL_ENV, "http://127.0.0.1:9999"),
    ]);

    let settings = Settings::from_file_config(FileConfig::default(), &env).unwrap();

    assert_eq!(settings.base_url.as_str(), "http://127.0.0.1:9999/");
    assert_eq!(settings.timeout, Duration::from_secs(60));
}

#[test]
fn given_custom_key_variable_when_resolved_then_reads_that_variable() {
    let mut config = FileConfig::default();
    config.provider.api_key_env = String::from("LOCAL_LLM_KEY");
    let env = HashMap::from([("LOCAL_LLM_KEY", "local-key-0123456789")]);

    let settings = Settings::from_file_config(config, &env).unwrap();

    assert_eq!(settings.api_key.expose(), "local-key-0123456789");
}

/// **VALUE**: A missing key is a configuration error naming the variable.
///
/// **WHY THIS MATTERS**: This is the most common first-run failure; the message
/// must say which variable to set.
#[test]
fn given_no_credential_when_resolved_then_missing_credential_error() {
    // GIVEN: An environment without the key
    let env: HashMap<&str, &str> = HashMap::new();

    // WHEN: Resolving settings
    let result = Settings::from_file_config(FileConfig::default(), &env);

    // THEN: MissingCredential naming OPENAI_API_KEY
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::MissingCredential { .. }));
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[test]
fn given_placeholder_or_blank_credentials_when_loaded_then_rejected() {
    let cases = [
        "",
        "   ",
        "your-api-key-here",
        "YOUR_API_KEY",
        "sk-xxxxxxxxxxxxxxxx",
        "sk-...",
        "<your key>",
        "<OPENAI_API_KEY>",
        "changeme",
        "sk-abc def",
    ];

    for value in cases {
        let env = HashMap::from([("OPENAI_API_KEY", value)]);
        let result = load_credential("OPENAI_API_KEY", &env);
        assert!(
            matches!(result, Err(ConfigError::InvalidCredential { .. })),
            "Expected rejection for {value:?}"
        );
    }
}

/// **VALUE**: Real keys reach the provider even when they happen to contain
/// placeholder-like runs or base64 punctuation.
///
/// **WHY THIS MATTERS**: Rejecting a working key locally leaves the user with
/// no way to run the tool; the provider is the authority on validity.
#[test]
fn given_real_looking_keys_when_loaded_then_accepted() {
    // GIVEN: Keys with "xxx"/"..." inside, base64 punctuation, and colons
    let cases = [
        "sk-proj-aB3xXxQ9kLm2Zt7Rw",
        "sk-abc/def+ghi=",
        "sk-ant-api03-abc...def",
        "gsk_QmFzZTY0K2tleS9oZXJl==",
        "org:key:12345",
    ];

    for value in cases {
        // WHEN: Loading the credential
        let env = HashMap::from([("OPENAI_API_KEY", value)]);
        let result = load_credential("OPENAI_API_KEY", &env);

        // THEN: Accepted unchanged
        let key = result.unwrap_or_else(|e| panic!("Expected {value:?} to be accepted: {e}"));
        assert_eq!(key.expose(), value);
    }
}

#[test]
fn given_invalid_credential_when_reported_then_value_not_in_message() {
    let env = HashMap::from([("OPENAI_API_KEY", "sk-secret value")]);

    let err = load_credential("OPENAI_API_KEY", &env).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidCredential { .. }));
    assert!(!err.to_string().contains("sk-secret"));
}

#[test]
fn given_explicit_missing_config_path_when_located_then_read_error() {
    let env: HashMap<&str, &str> = HashMap::new();

    let result = locate_config_file(Some(Path::new("/definitely/not/here.toml")), &env);

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn given_config_env_var_when_located_then_uses_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[defaults]\nmodel = \"gpt-4\"\n").unwrap();
    let path_str = path.to_string_lossy().to_string();
    let env = HashMap::from([
        ("PSEUDOGEN_CONFIG", path_str.as_str()),
        ("OPENAI_API_KEY", VALID_KEY),
    ]);

    let settings = Settings::resolve(None, &env).unwrap();

    assert_eq!(settings.default_model.as_deref(), Some("gpt-4"));
}
