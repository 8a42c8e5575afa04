//! Analysis worker events
//!
//! Sent from worker threads to the UI thread via mpsc::channel.

use std::sync::mpsc;

use crate::analysis::client::{AnalysisOutcome, ServiceStatus};

/// Monotonic id of an accepted submission
pub type SubmissionId = u64;

/// Channel sender for analysis events
pub type AnalysisSender = mpsc::Sender<AnalysisEvent>;
/// Channel receiver for analysis events
pub type AnalysisReceiver = mpsc::Receiver<AnalysisEvent>;

/// Event sent from a worker thread to the UI thread
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// Request for a submission settled
    Settled {
        submission_id: SubmissionId,
        outcome: AnalysisOutcome,
    },
    /// Health probe finished
    Health {
        result: Result<ServiceStatus, String>,
    },
}

impl AnalysisEvent {
    /// Submission this event belongs to, if any
    pub fn submission_id(&self) -> Option<SubmissionId> {
        match self {
            AnalysisEvent::Settled { submission_id, .. } => Some(*submission_id),
            AnalysisEvent::Health { .. } => None,
        }
    }
}
