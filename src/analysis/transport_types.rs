//! Transport types
//!
//! Common types shared across transport implementations.

/// Transport-level failures (no HTTP response could be obtained)
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response started but the body could not be read
    #[error("Body read error: {0}")]
    Body(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Raw HTTP response
///
/// Transports never interpret the status code; that is the client's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client so the outcome classification can be
/// tested with `FakeTransport`.
pub trait SyncTransport: Send + Sync {
    /// POST a JSON body and return the raw response
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError>;

    /// GET a URL and return the raw response
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
