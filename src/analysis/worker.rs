//! Analysis worker threads
//!
//! One fire-and-forget thread per submission. The thread does only network
//! I/O and reports back over the channel; all state changes happen on the UI
//! thread.
//!
//! Every spawned submission produces exactly one `Settled` event, including
//! when the request code panics. If the receiver is gone (the UI state was
//! torn down) the send fails and the settlement is dropped.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::analysis::client::{AnalysisClient, AnalysisOutcome, FailureCause};
use crate::analysis::events::{AnalysisEvent, AnalysisSender, SubmissionId};

/// Handle of a running analysis thread
#[derive(Debug)]
pub struct AnalysisThreadHandle {
    handle: Option<JoinHandle<()>>,
    submission_id: SubmissionId,
}

impl AnalysisThreadHandle {
    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    /// Check if thread is still running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Wait for the thread to exit
    ///
    /// Returns false if the thread panicked.
    pub fn join(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.join().is_ok(),
            None => true,
        }
    }
}

/// Sends the settlement on drop unless one was already sent
struct SettleGuard {
    tx: AnalysisSender,
    submission_id: SubmissionId,
    settled: bool,
}

impl SettleGuard {
    fn settle(&mut self, outcome: AnalysisOutcome) {
        self.settled = true;
        if self
            .tx
            .send(AnalysisEvent::Settled {
                submission_id: self.submission_id,
                outcome,
            })
            .is_err()
        {
            debug!(submission_id = self.submission_id, "receiver gone, settlement dropped");
        }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.settled {
            error!(submission_id = self.submission_id, "analysis worker exited without settling");
            self.settle(AnalysisOutcome::ConnectivityFailure(FailureCause::Aborted(
                "worker exited without a response".to_string(),
            )));
        }
    }
}

/// Spawn a thread that analyzes `query` and settles `submission_id`
pub fn spawn_analysis_thread(
    client: Arc<AnalysisClient>,
    submission_id: SubmissionId,
    query: String,
    tx: AnalysisSender,
) -> AnalysisThreadHandle {
    let handle = thread::spawn(move || {
        let mut guard = SettleGuard {
            tx,
            submission_id,
            settled: false,
        };
        debug!(submission_id, "analysis thread started");
        let outcome = client.analyze(&query);
        guard.settle(outcome);
    });

    AnalysisThreadHandle {
        handle: Some(handle),
        submission_id,
    }
}

/// Spawn a thread that probes the service health endpoint
pub fn spawn_health_thread(client: Arc<AnalysisClient>, tx: AnalysisSender) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = client.health().map_err(|e| e.to_string());
        let _ = tx.send(AnalysisEvent::Health { result });
    })
}
