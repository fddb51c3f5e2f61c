//! HTTP status categorisation shared by the source downloader and the
//! completion client.

/// HTTP status code carried by errors.
///
/// Stored directly rather than parsed back out of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// The credential was missing, malformed or refused.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.0, 401 | 403)
    }

    /// The provider is throttling this key.
    pub fn is_rate_limited(&self) -> bool {
        self.0 == 429
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
