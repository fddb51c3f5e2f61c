use crate::error::InputError;
use crate::input::{SourceLoader, SourceOrigin};

use std::time::Duration;

#[test]
fn given_http_and_https_urls_when_classified_then_remote() {
    assert!(matches!(
        SourceOrigin::classify("https://example.com/main.rs"),
        SourceOrigin::Remote(_)
    ));
    assert!(matches!(
        SourceOrigin::classify("http://localhost:8000/a.py"),
        SourceOrigin::Remote(_)
    ));
}

/// **VALUE**: Paths never get mistaken for URLs.
///
/// **BUG THIS CATCHES**: A naive `contains("://")` or `Url::parse().is_ok()` check
/// treats `C:\src\main.rs` and `file:///x` as downloads.
#[test]
fn given_paths_and_other_schemes_when_classified_then_local() {
    let cases = [
        "src/main.rs",
        "./example.py",
        "/tmp/a.c",
        r"C:\src\main.rs",
        "file:///tmp/a.c",
        "ftp://example.com/a.c",
    ];

    for origin in cases {
        assert_eq!(
            SourceOrigin::classify(origin),
            SourceOrigin::Local(origin.to_string()),
            "{origin} should be local"
        );
    }
}

#[tokio::test]
async fn given_missing_file_when_loaded_then_not_found() {
    let loader = SourceLoader::new(Duration::from_secs(5)).unwrap();

    let result = loader.load("/definitely/not/here.py").await;

    assert!(matches!(result, Err(InputError::NotFound { .. })));
}

#[tokio::test]
async fn given_non_utf8_file_when_loaded_then_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.bin");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();
    let loader = SourceLoader::new(Duration::from_secs(5)).unwrap();

    let result = loader.load(&path.to_string_lossy()).await;

    assert!(matches!(result, Err(InputError::Decode { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn given_unreadable_file_when_loaded_then_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secret.py");
    std::fs::write(&path, "x = 1").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores file modes; nothing to assert there.
    if std::fs::read(&path).is_ok() {
        return;
    }

    let loader = SourceLoader::new(Duration::from_secs(5)).unwrap();
    let result = loader.load(&path.to_string_lossy()).await;

    assert!(matches!(result, Err(InputError::PermissionDenied { .. })));
}
