// Exit-code mapping and error folding

use crate::driver::report;
use crate::error::PseudogenError;

use pseudogen_core::ModelRegistry;
use pseudogen_core::error::{CompletionError, ConfigError, InputError};

/// **VALUE**: Each failure category has its own, stable, non-zero exit code.
///
/// **WHY THIS MATTERS**: Scripts branch on these codes (retry on provider errors,
/// fix the key on configuration errors). Changing one silently breaks them.
#[test]
fn given_each_category_when_mapped_then_distinct_nonzero_exit_codes() {
    let errors = [
        PseudogenError::from(ConfigError::missing_credential("OPENAI_API_KEY")),
        PseudogenError::from(ModelRegistry::builtin().resolve("nope").unwrap_err()),
        PseudogenError::from(InputError::http_status("http://x/a.py", 404)),
        PseudogenError::from(CompletionError::from_http_response(500, "boom")),
        PseudogenError::from(pseudogen_core::error::OutputError::file(
            "out.txt",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        )),
    ];

    let codes: Vec<u8> = errors.iter().map(|e| e.exit_code()).collect();
    assert_eq!(codes, vec![78, 64, 66, 69, 73]);

    let categories: Vec<&str> = errors.iter().map(|e| e.category()).collect();
    assert_eq!(
        categories,
        vec!["configuration", "validation", "input", "provider", "output"]
    );
}

#[test]
fn given_auth_and_rate_limit_when_folded_then_provider_category() {
    let auth = PseudogenError::from(CompletionError::from_http_response(401, "bad key"));
    let throttled = PseudogenError::from(CompletionError::from_http_response(429, "slow"));

    assert!(matches!(auth, PseudogenError::Provider { .. }));
    assert!(matches!(throttled, PseudogenError::Provider { .. }));
    assert!(auth.message().contains("bad key"));
}

/// **VALUE**: The folded error points at where the failure was raised in core,
/// not at the conversion site.
#[test]
fn given_core_error_when_folded_then_keeps_core_location() {
    let core = InputError::decode("a.bin");
    let raised_at = core.location();

    let err = PseudogenError::from(core);

    assert!(matches!(err, PseudogenError::Input { .. }));
    assert!(err.to_string().contains(&raised_at.to_string()));
}

/// **VALUE**: The user sees one short line with no source position in it.
///
/// **BUG THIS CATCHES**: Would catch `[file.rs:line:col]` leaking into the
/// terminal, or the report growing a second copy of the message.
#[test]
fn given_failure_when_reported_then_single_line_without_location() {
    // GIVEN: A configuration failure
    let core = ConfigError::missing_credential("OPENAI_API_KEY");
    let location = core.location().to_string();
    let err = PseudogenError::from(core);
    let mut stderr = Vec::new();

    // WHEN: Reporting it
    let code = report(&err, &mut stderr);

    // THEN: One line naming the variable, no location, exit 78
    let text = String::from_utf8(stderr).unwrap();
    assert_eq!(code, 78);
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("error: "));
    assert!(text.contains("OPENAI_API_KEY"));
    assert!(!text.contains(&location));
    assert!(!text.contains(".rs:"));
}
