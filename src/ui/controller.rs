//! Submission lifecycle state machine
//!
//! Owns the Result Store, the Error Store and the loading flag. Nothing else
//! can write them: the fields are private and the only mutators are
//! `submit` and `settle`.
//!
//! ```text
//! Idle ──submit(non-empty)──▶ InFlight ──Success──────────────▶ Succeeded
//!                               │  ▲    ──RateLimited/Failure──▶ Failed
//!                               │  └──────submit(non-empty)───── Succeeded|Failed
//! *  ──submit(empty)──▶ *   (no-op)
//! ```
//!
//! Only the most recently issued submission may commit. A settlement for an
//! older id is `Stale` and leaves every store untouched.

use tracing::{debug, info, warn};

use crate::analysis::{AnalysisOutcome, NutritionRecord, SubmissionId};

/// Error Store text for HTTP 429
pub const RATE_LIMITED_MESSAGE: &str = "Traffic is high. Please try again in 10s.";

/// Error Store text for every other failure
pub const CONNECTIVITY_MESSAGE: &str = "Server connection failed. Is backend running?";

/// Derived lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Accepted submission, handed to whoever performs the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub query: String,
}

/// What `settle` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Outcome committed, loading cleared
    Applied(SubmissionState),
    /// Outcome belonged to a superseded or already settled submission
    Stale,
}

/// Returns true if the query may be submitted
pub fn is_submittable(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Submission controller
#[derive(Debug, Default)]
pub struct SubmissionController {
    result: Option<NutritionRecord>,
    error: Option<String>,
    in_flight: Option<SubmissionId>,
    last_issued: SubmissionId,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission
    ///
    /// Empty or whitespace-only queries are ignored and return `None`.
    /// Otherwise both stores are cleared and the loading flag raised before
    /// the returned `Submission` is handed to the transport. The query is
    /// passed through untouched.
    pub fn submit(&mut self, query: &str) -> Option<Submission> {
        if !is_submittable(query) {
            debug!("empty query, submit skipped");
            return None;
        }

        self.last_issued += 1;
        let id = self.last_issued;
        if let Some(previous) = self.in_flight.replace(id) {
            warn!(previous, id, "submission superseded while in flight");
        }
        self.error = None;
        self.result = None;

        info!(id, "submission started");
        Some(Submission {
            id,
            query: query.to_string(),
        })
    }

    /// Apply the outcome of submission `id`
    pub fn settle(&mut self, id: SubmissionId, outcome: AnalysisOutcome) -> Settlement {
        if self.in_flight != Some(id) {
            debug!(id, current = ?self.in_flight, "stale settlement ignored");
            return Settlement::Stale;
        }

        match outcome {
            AnalysisOutcome::Success(record) => {
                self.result = Some(record);
                self.error = None;
            }
            AnalysisOutcome::RateLimited => {
                self.result = None;
                self.error = Some(RATE_LIMITED_MESSAGE.to_string());
            }
            AnalysisOutcome::ConnectivityFailure(_) => {
                self.result = None;
                self.error = Some(CONNECTIVITY_MESSAGE.to_string());
            }
        }
        self.in_flight = None;

        let state = self.state();
        info!(id, ?state, "submission settled");
        Settlement::Applied(state)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the submission currently awaited
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Result Store
    pub fn result(&self) -> Option<&NutritionRecord> {
        self.result.as_ref()
    }

    /// Error Store
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> SubmissionState {
        if self.in_flight.is_some() {
            SubmissionState::InFlight
        } else if self.result.is_some() {
            SubmissionState::Succeeded
        } else if self.error.is_some() {
            SubmissionState::Failed
        } else {
            SubmissionState::Idle
        }
    }

    /// Whether the submit affordance should be enabled for `query`
    pub fn submit_enabled(&self, query: &str) -> bool {
        is_submittable(query) && !self.is_loading()
    }
}
