//! Application state for the terminal UI
//!
//! State is split between:
//! - InputBuffer (written only by key handling)
//! - Submission lifecycle (owned by `SubmissionController`)
//! - Worker plumbing (settlement channel, thread handles)
//! - Activity console (local messages, never sent anywhere)

use std::sync::mpsc::{channel, TryRecvError};
use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::{
    spawn_analysis_thread, spawn_health_thread, AnalysisClient, AnalysisEvent, AnalysisReceiver,
    AnalysisSender, AnalysisThreadHandle, NutritionRecord, SubmissionId,
};
use crate::ui::controller::{Settlement, SubmissionController, SubmissionState};

/// Maximum number of console messages to retain
const MAX_CONSOLE_MESSAGES: usize = 100;

/// Console message for the activity panel
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

/// High-level application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Read-only projection consumed by the renderer
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
    pub query: &'a str,
    pub submit_enabled: bool,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub result: Option<&'a NutritionRecord>,
    pub console: &'a [ConsoleMessage],
}

/// Main application state
pub struct App {
    /// Current input buffer
    pub input_buffer: String,
    /// Activity console messages
    pub console_messages: Vec<ConsoleMessage>,
    controller: SubmissionController,
    client: Arc<AnalysisClient>,
    event_tx: AnalysisSender,
    event_rx: AnalysisReceiver,
    workers: Vec<AnalysisThreadHandle>,
    should_quit: bool,
}

impl App {
    /// Create application talking to `client`
    pub fn new(client: AnalysisClient) -> Self {
        let (event_tx, event_rx) = channel();
        App {
            input_buffer: String::new(),
            console_messages: Vec::new(),
            controller: SubmissionController::new(),
            client: Arc::new(client),
            event_tx,
            event_rx,
            workers: Vec::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> AppState {
        if self.should_quit {
            AppState::Quitting
        } else {
            AppState::Running
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Add console message
    pub fn log(&mut self, message: impl Into<String>) {
        self.console_messages.push(ConsoleMessage {
            content: message.into(),
            timestamp: chrono::Local::now(),
        });
        if self.console_messages.len() > MAX_CONSOLE_MESSAGES {
            let excess = self.console_messages.len() - MAX_CONSOLE_MESSAGES;
            self.console_messages.drain(..excess);
        }
    }

    // Input buffer

    pub fn handle_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }

    // Submission lifecycle

    /// Submit `query` for analysis
    ///
    /// Returns the submission id, or `None` for an empty query. Does not
    /// check the loading flag; callers gate on `submit_enabled`.
    pub fn submit(&mut self, query: &str) -> Option<SubmissionId> {
        let submission = self.controller.submit(query)?;
        let handle = spawn_analysis_thread(
            Arc::clone(&self.client),
            submission.id,
            submission.query,
            self.event_tx.clone(),
        );
        self.workers.push(handle);
        Some(submission.id)
    }

    /// Submit the current input buffer
    pub fn submit_input(&mut self) -> Option<SubmissionId> {
        let query = self.input_buffer.clone();
        self.submit(&query)
    }

    /// Probe the service health endpoint in the background
    pub fn request_health(&mut self) {
        self.log(format!("Checking {} ...", self.client.base_url()));
        spawn_health_thread(Arc::clone(&self.client), self.event_tx.clone());
    }

    /// Drain pending worker events (non-blocking)
    ///
    /// Returns the number of settlements that were applied.
    pub fn process_analysis_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    if self.handle_analysis_event(event) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.workers.retain(|w| w.is_running());
        applied
    }

    /// Block until the next worker event arrives or `timeout` elapses
    ///
    /// Returns true if a settlement was applied.
    pub fn wait_for_event(&mut self, timeout: std::time::Duration) -> bool {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => self.handle_analysis_event(event),
            Err(_) => false,
        }
    }

    fn handle_analysis_event(&mut self, event: AnalysisEvent) -> bool {
        match event {
            AnalysisEvent::Settled {
                submission_id,
                outcome,
            } => match self.controller.settle(submission_id, outcome) {
                Settlement::Applied(state) => {
                    let summary = match state {
                        SubmissionState::Succeeded => self
                            .controller
                            .result()
                            .map(|r| format!("Analyzed: {}", r.item_name)),
                        _ => self.controller.error().map(|e| format!("Failed: {}", e)),
                    };
                    if let Some(summary) = summary {
                        self.log(summary);
                    }
                    true
                }
                Settlement::Stale => {
                    debug!(submission_id, "dropping superseded settlement");
                    false
                }
            },
            AnalysisEvent::Health { result } => {
                match result {
                    Ok(status) => {
                        info!(?status, "service healthy");
                        self.log(format!(
                            "Service: {} (model: {})",
                            status.status.as_deref().unwrap_or("unknown"),
                            status.model.as_deref().unwrap_or("unknown")
                        ));
                    }
                    Err(e) => self.log(format!("Service unreachable: {}", e)),
                }
                false
            }
        }
    }

    /// Number of worker threads not yet reaped
    pub fn active_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.is_running()).count()
    }

    // Read-only projections

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn result(&self) -> Option<&NutritionRecord> {
        self.controller.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Submit is enabled when the input is non-empty and nothing is loading
    pub fn submit_enabled(&self) -> bool {
        self.controller.submit_enabled(&self.input_buffer)
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        ViewModel {
            query: &self.input_buffer,
            submit_enabled: self.submit_enabled(),
            loading: self.is_loading(),
            error: self.controller.error(),
            result: self.controller.result(),
            console: &self.console_messages,
        }
    }
}
