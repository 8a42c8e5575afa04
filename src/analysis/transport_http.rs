//! Real HTTP transport using reqwest
//!
//! Blocking client, called only from worker threads and one-shot CLI modes.

use std::time::Duration;

use tracing::debug;

use crate::analysis::transport_types::{HttpResponse, SyncTransport, TransportError};

/// Real HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create transport without a request timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Create transport with an optional request timeout
    ///
    /// `None` waits until the connection resolves or fails.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    fn read(response: reqwest::blocking::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status, body_len = body.len(), "http response");
        Ok(HttpResponse { status, body })
    }
}

impl SyncTransport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        debug!(url, body_len = body.len(), "POST");
        let mut request = self.client.post(url);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }
        let response = request
            .body(body.to_string())
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::read(response)
    }

    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::read(response)
    }
}
