//! Chat-completion client.
//!
//! One request per run: a single user message holding the prompt, sent to
//! `{base_url}chat/completions`. The first choice's message content is the
//! result. No retries; a failed run is re-run by the user.

pub mod wire;

use crate::config::Settings;
use crate::error::CompletionError;
use crate::prompt::CompletionRequest;
use crate::{CHAT_COMPLETIONS_ENDPOINT, USER_AGENT};

use common::{HttpStatusCode, RedactedApiKey};

use wire::{ApiErrorBody, ChatRequest, ChatResponse};

use std::future::Future;

use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub text: String,
}

/// Anything that can turn a request into a completion.
///
/// The driver is generic over this so runs can be exercised without a provider.
pub trait Completer {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResult, CompletionError>>;
}

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct ChatCompletionClient {
    endpoint: Url,
    api_key: RedactedApiKey,
    client: Client,
}

impl ChatCompletionClient {
    /// Build a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::ClientSetup`] if the endpoint URL cannot be
    /// formed or the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self, CompletionError> {
        let endpoint = settings
            .base_url
            .join(CHAT_COMPLETIONS_ENDPOINT)
            .map_err(|e| CompletionError::client_setup(format!("Invalid endpoint: {e}")))?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CompletionError::client_setup(e.to_string()))?;

        debug!(
            "Completion client ready: endpoint={}, timeout={:?}",
            endpoint, settings.timeout
        );

        Ok(Self {
            endpoint,
            api_key: settings.api_key.clone(),
            client,
        })
    }
}

impl Completer for ChatCompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        info!(
            "Requesting completion from {} (model={}, prompt={} bytes)",
            self.endpoint,
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose())
            .json(&ChatRequest::from(request))
            .send()
            .await
            .map_err(|e| CompletionError::from_reqwest(&e))?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::from_reqwest(&e))?;

        if !status.is_success() {
            let error = CompletionError::from_http_response(status.0, provider_message(&body));
            warn!("Completion failed ({}): {}", error.error_category(), error);
            return Err(error);
        }

        let result = extract_completion(&body)?;
        info!("Received completion ({} bytes)", result.text.len());
        Ok(result)
    }
}

/// Pull the first choice's text out of a success body.
///
/// # Errors
///
/// Returns [`CompletionError::Provider`] if the body is not JSON of the
/// expected shape, has no choices, or the content is missing or blank.
pub fn extract_completion(body: &str) -> Result<CompletionResult, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::malformed(format!("Malformed response body: {e}")))?;

    let Some(choice) = response.choices.into_iter().next() else {
        return Err(CompletionError::malformed("Response contained no choices"));
    };

    let text = choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| CompletionError::malformed("First choice has no message content"))?;

    if text.trim().is_empty() {
        return Err(CompletionError::malformed("Provider returned an empty completion"));
    }

    Ok(CompletionResult { text })
}

/// Best human-readable message for an error body: the provider's own
/// `error.message` when present, otherwise the raw text.
pub(crate) fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => String::from("<empty body>"),
        Err(_) => body.trim().to_string(),
    }
}
