use pseudogen_core::config::{FileConfig, Settings};

use std::collections::HashMap;
use std::net::TcpListener;

use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-integration0123456789";

/// Settings pointing at `server` under `/v1/`, with a short timeout.
pub fn settings_for(server: &MockServer) -> Settings {
    settings_for_uri(&server.uri())
}

pub fn settings_for_uri(uri: &str) -> Settings {
    settings_with_timeout(uri, 5)
}

pub fn settings_with_timeout(uri: &str, timeout_secs: u64) -> Settings {
    let mut config = FileConfig::default();
    config.provider.base_url = format!("{uri}/v1");
    config.provider.timeout_secs = timeout_secs;

    let env = HashMap::from([("OPENAI_API_KEY", TEST_API_KEY)]);
    Settings::from_file_config(config, &env).expect("test settings resolve")
}

pub fn completion_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }
        ]
    })
}

/// Base URI of a local port with nothing listening on it.
///
/// wiremock pools its servers, so dropping a `MockServer` does not close the port.
pub fn closed_local_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
