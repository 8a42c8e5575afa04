//! HTTP transport selection
//!
//! Concrete transport enum, so the client stays a plain struct.

pub use crate::analysis::transport_fake::FakeTransport;
pub use crate::analysis::transport_http::HttpTransport;
pub use crate::analysis::transport_types::{HttpResponse, SyncTransport, TransportError};

/// Concrete transport enum
#[derive(Debug, Clone)]
pub enum Transport {
    Real(HttpTransport),
    Fake(FakeTransport),
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }

    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        match self {
            Transport::Real(t) => t.get(url),
            Transport::Fake(t) => t.get(url),
        }
    }
}

impl From<HttpTransport> for Transport {
    fn from(t: HttpTransport) -> Self {
        Transport::Real(t)
    }
}

impl From<FakeTransport> for Transport {
    fn from(t: FakeTransport) -> Self {
        Transport::Fake(t)
    }
}
