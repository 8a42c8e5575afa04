//! Terminal UI
//!
//! The UI is a deterministic surface over the submission controller:
//! - Keystrokes edit the input buffer
//! - Enter forwards the submit gesture (gated on `submit_enabled`)
//! - Network I/O happens on worker threads, settlements are pumped on the
//!   UI thread by `App::process_analysis_events`
//! - Rendering is a pure function of `ViewModel`

pub mod controller;
pub mod handlers;
pub mod input;
pub mod state;
pub mod terminal;
pub mod view;

// Re-exports
pub use controller::{
    Settlement, Submission, SubmissionController, SubmissionState, CONNECTIVITY_MESSAGE,
    RATE_LIMITED_MESSAGE,
};
pub use input::{is_local_command, parse_command, render_help, Command};
pub use state::{App, AppState, ConsoleMessage, ViewModel};
pub use view::render;
