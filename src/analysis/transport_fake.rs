//! Fake transport for testing
//!
//! Returns scripted responses instead of making HTTP calls, and records
//! every request it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::analysis::transport_types::{HttpResponse, SyncTransport, TransportError};

/// Request captured by `FakeTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Scripted reply
#[derive(Debug, Clone)]
pub enum FakeReply {
    Response(HttpResponse),
    NetworkError(String),
    Panic(String),
}

/// Fake transport for testing
///
/// Replies are consumed in order; the last one repeats once the script runs
/// out. Clones share the request log and the script.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    replies: Arc<Mutex<VecDeque<FakeReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    delay: Option<Duration>,
}

impl FakeTransport {
    /// Always answer with the given status and body
    pub fn new(status: u16, body: &str) -> Self {
        Self::scripted(vec![FakeReply::Response(HttpResponse::new(status, body))])
    }

    /// Always answer 200 with the given body
    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    /// Always fail at the transport level
    pub fn with_error(msg: &str) -> Self {
        Self::scripted(vec![FakeReply::NetworkError(msg.to_string())])
    }

    /// Answer with a sequence of replies
    pub fn scripted(replies: Vec<FakeReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn next_reply(&self) -> Option<FakeReply> {
        let mut replies = self.replies.lock().ok()?;
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    }

    fn answer(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method: method.to_string(),
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            });
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.next_reply() {
            Some(FakeReply::Response(response)) => Ok(response),
            Some(FakeReply::NetworkError(msg)) => Err(TransportError::Network(msg)),
            Some(FakeReply::Panic(msg)) => panic!("{}", msg),
            None => Err(TransportError::Network("no scripted reply".to_string())),
        }
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        self.answer("POST", url, headers, body)
    }

    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.answer("GET", url, &[], "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_transport_basic() {
        let transport = FakeTransport::ok("test response");
        let result = transport.post_json("http://test", &[], "{}");
        assert_eq!(result.unwrap(), HttpResponse::new(200, "test response"));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("refused");
        let result = transport.post_json("http://test", &[], "{}");
        assert!(matches!(result, Err(TransportError::Network(ref m)) if m == "refused"));
    }

    #[test]
    fn test_fake_transport_script_repeats_last() {
        let transport = FakeTransport::scripted(vec![
            FakeReply::Response(HttpResponse::new(429, "")),
            FakeReply::Response(HttpResponse::new(200, "ok")),
        ]);
        assert_eq!(transport.get("http://a").unwrap().status, 429);
        assert_eq!(transport.get("http://a").unwrap().status, 200);
        assert_eq!(transport.get("http://a").unwrap().status, 200);
    }

    #[test]
    fn test_fake_transport_records_requests() {
        let transport = FakeTransport::ok("{}");
        let shared = transport.clone();
        transport
            .post_json(
                "http://x/analyze",
                &[("Content-Type", "application/json")],
                "{\"query\":\"egg\"}",
            )
            .unwrap();
        let requests = shared.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://x/analyze");
        assert_eq!(requests[0].body, "{\"query\":\"egg\"}");
    }
}
