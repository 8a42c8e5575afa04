//! Analysis service client
//!
//! Builds the `/analyze` request and folds whatever comes back into a
//! tagged `AnalysisOutcome`. Status codes are interpreted here and nowhere
//! else.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::analysis::record::NutritionRecord;
use crate::analysis::transport::{SyncTransport, Transport, TransportError};

/// Path of the analysis endpoint, relative to the base URL
pub const ANALYZE_PATH: &str = "/analyze";

/// HTTP status used by the service to signal rate limiting
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Why a submission ended as a connectivity failure
#[derive(Debug, Clone, PartialEq)]
pub enum FailureCause {
    /// No response could be obtained
    Transport(String),
    /// Response with a non-2xx status other than 429
    Status(u16),
    /// 2xx response whose body is not a valid record
    MalformedBody(String),
    /// The request never settled normally (worker died)
    Aborted(String),
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCause::Transport(msg) => write!(f, "transport failure: {}", msg),
            FailureCause::Status(status) => write!(f, "HTTP status {}", status),
            FailureCause::MalformedBody(msg) => write!(f, "malformed body: {}", msg),
            FailureCause::Aborted(msg) => write!(f, "aborted: {}", msg),
        }
    }
}

/// Result of one analysis request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(NutritionRecord),
    RateLimited,
    ConnectivityFailure(FailureCause),
}

impl AnalysisOutcome {
    /// Classify a transport result
    pub fn from_response(result: Result<crate::analysis::HttpResponse, TransportError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                return AnalysisOutcome::ConnectivityFailure(FailureCause::Transport(
                    e.to_string(),
                ))
            }
        };

        if response.status == STATUS_TOO_MANY_REQUESTS {
            return AnalysisOutcome::RateLimited;
        }
        if !response.is_success() {
            return AnalysisOutcome::ConnectivityFailure(FailureCause::Status(response.status));
        }

        match NutritionRecord::from_json(&response.body) {
            Ok(record) => AnalysisOutcome::Success(record),
            Err(e) => {
                AnalysisOutcome::ConnectivityFailure(FailureCause::MalformedBody(e.to_string()))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Health probe errors
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Service returned HTTP {0}")]
    Status(u16),

    #[error("Unreadable status payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Client for the remote analysis service
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    transport: Transport,
    base_url: String,
}

impl AnalysisClient {
    /// Create client for `base_url` (no trailing slash expected)
    pub fn new(transport: impl Into<Transport>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport: transport.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the analysis endpoint
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// Send one analysis request and classify the result
    ///
    /// The query is sent exactly as given. Blocks until the transport
    /// settles; no retries.
    pub fn analyze(&self, query: &str) -> AnalysisOutcome {
        let url = self.analyze_url();
        let body = serde_json::json!({ "query": query }).to_string();
        debug!(url = %url, query_len = query.len(), "sending analysis request");

        let result = self
            .transport
            .post_json(&url, &[("Content-Type", "application/json")], &body);
        let outcome = AnalysisOutcome::from_response(result);

        match &outcome {
            AnalysisOutcome::Success(record) => {
                info!(item = %record.item_name, calories = record.calories, "analysis succeeded")
            }
            AnalysisOutcome::RateLimited => warn!("analysis rate limited"),
            AnalysisOutcome::ConnectivityFailure(cause) => warn!(%cause, "analysis failed"),
        }
        outcome
    }

    /// Probe `GET /` on the service
    pub fn health(&self) -> Result<ServiceStatus, HealthError> {
        let url = format!("{}/", self.base_url);
        let response = self.transport.get(&url)?;
        if !response.is_success() {
            return Err(HealthError::Status(response.status));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
