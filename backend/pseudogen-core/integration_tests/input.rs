use crate::helpers::closed_local_uri;

use pseudogen_core::SourceLoader;
use pseudogen_core::error::InputError;

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn loader() -> SourceLoader {
    SourceLoader::new(Duration::from_secs(5)).unwrap()
}

/// **VALUE**: Local files come back byte-for-byte, including trailing whitespace.
#[tokio::test]
async fn given_local_file_when_loaded_then_content_matches_file_bytes() {
    // GIVEN: A file with unicode, CRLF and a trailing newline
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("example.py");
    let content = "def fibonacci(n):\r\n    return n  # ñ → ✓\n\n";
    std::fs::write(&file, content).unwrap();

    // WHEN: Loading by path
    let origin = file.to_string_lossy().to_string();
    let doc = loader().load(&origin).await.unwrap();

    // THEN: Identical content and the origin preserved
    assert_eq!(doc.content, content);
    assert_eq!(doc.origin, origin);
}

#[tokio::test]
async fn given_url_serving_source_when_loaded_then_body_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fn main() {}\n"))
        .expect(1)
        .mount(&server)
        .await;

    let origin = format!("{}/raw/main.rs", server.uri());
    let doc = loader().load(&origin).await.unwrap();

    assert_eq!(doc.content, "fn main() {}\n");
}

/// **VALUE**: A 404 is an input error carrying the status, not an empty document.
///
/// **BUG THIS CATCHES**: Would catch the loader returning the 404 page body as
/// "source", which would then be sent to the provider and billed.
#[tokio::test]
async fn given_url_returning_404_when_loaded_then_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let origin = format!("{}/missing.py", server.uri());
    let result = loader().load(&origin).await;

    let err = result.unwrap_err();
    assert!(matches!(err, InputError::HttpStatus { .. }), "got {err:?}");
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn given_unreachable_url_when_loaded_then_network_error() {
    let origin = format!("{}/gone.py", closed_local_uri());

    let result = loader().load(&origin).await;

    assert!(matches!(result, Err(InputError::Network { .. })), "got {result:?}");
}

/// **VALUE**: The loader gives up once its timeout elapses.
///
/// **BUG THIS CATCHES**: Would catch the loader building its client without the
/// configured timeout, leaving a stalled download hanging the run.
#[tokio::test]
async fn given_slow_url_when_loaded_with_short_timeout_then_timeout_error() {
    // GIVEN: A source that answers after 3 s and a loader that waits 1 s
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("x = 1")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let loader = SourceLoader::new(Duration::from_secs(1)).unwrap();

    // WHEN: Loading
    let result = loader.load(&format!("{}/slow.py", server.uri())).await;

    // THEN: A network error flagged as a timeout
    assert!(
        matches!(result, Err(InputError::Network { is_timeout: true, .. })),
        "got {result:?}"
    );
}
