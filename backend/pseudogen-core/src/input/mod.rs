//! Source loading from a local path or an http(s) URL.
//!
//! Whether `origin` is a URL is decided by parsing it: only an absolute URL
//! with an `http` or `https` scheme is downloaded. Anything else, including
//! Windows drive paths such as `C:\src\main.rs`, is read from disk.

use crate::USER_AGENT;
use crate::error::InputError;

use common::HttpStatusCode;

use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub origin: String,
    pub content: String,
}

/// Where a source argument points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    Remote(Url),
    Local(String),
}

impl SourceOrigin {
    pub fn classify(origin: &str) -> Self {
        match Url::parse(origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceOrigin::Remote(url),
            _ => SourceOrigin::Local(origin.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct SourceLoader {
    client: Client,
}

impl SourceLoader {
    /// # Errors
    ///
    /// Returns [`InputError::Network`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, InputError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| InputError::from_reqwest("<client>", &e))?;

        Ok(Self { client })
    }

    /// Load the document `origin` refers to.
    pub async fn load(&self, origin: &str) -> Result<SourceDocument, InputError> {
        let content = match SourceOrigin::classify(origin) {
            SourceOrigin::Remote(url) => self.fetch(url).await?,
            SourceOrigin::Local(path) => read_file(Path::new(&path)).await?,
        };

        info!("Loaded {} ({} bytes)", origin, content.len());

        Ok(SourceDocument {
            origin: origin.to_string(),
            content,
        })
    }

    async fn fetch(&self, url: Url) -> Result<String, InputError> {
        debug!("Downloading source from {url}");

        let url_str = url.to_string();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InputError::from_reqwest(&url_str, &e))?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            return Err(InputError::http_status(&url_str, status.0));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InputError::from_reqwest(&url_str, &e))?;

        String::from_utf8(bytes.to_vec()).map_err(|_| InputError::decode(url_str))
    }
}

async fn read_file(path: &Path) -> Result<String, InputError> {
    debug!("Reading source from {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InputError::from_io(path, e))?;

    String::from_utf8(bytes).map_err(|_| InputError::decode(path.display().to_string()))
}
