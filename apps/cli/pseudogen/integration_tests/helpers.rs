use pseudogen_core::error::CompletionError;
use pseudogen_core::{Completer, CompletionRequest, CompletionResult};

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

pub const TEST_API_KEY: &str = "sk-integration0123456789";

/// Completer double that returns a fixed text and counts calls.
pub struct FixedCompleter {
    text: String,
    calls: Cell<usize>,
    last_request: RefCell<Option<CompletionRequest>>,
}

impl FixedCompleter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.borrow().clone()
    }
}

impl Completer for FixedCompleter {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        Ok(CompletionResult {
            text: self.text.clone(),
        })
    }
}

/// Completer double that always fails with a rate limit.
pub struct ThrottledCompleter;

impl Completer for ThrottledCompleter {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        Err(CompletionError::from_http_response(429, "slow down"))
    }
}

pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write source fixture");
    path
}

/// Config file pointing the provider at `base_uri`.
pub fn write_config(dir: &Path, base_uri: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let text = format!(
        "version = 1\n\n[provider]\nbase_url = \"{base_uri}/v1\"\ntimeout_secs = 5\n"
    );
    std::fs::write(&path, text).expect("write config fixture");
    path
}

pub fn completion_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": text}}
        ]
    })
}
