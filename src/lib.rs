//! MacroAI: terminal client for meal nutrition analysis
//!
//! Sends free-text meal descriptions to a remote analysis service and shows
//! the returned nutrition breakdown. The client is a thin orchestrator around
//! one network call per submission; all nutrition facts come from the
//! service.

pub mod analysis;
pub mod cli;
pub mod ui;

// Re-export the submission core
pub use analysis::{AnalysisClient, AnalysisOutcome, FailureCause, NutritionRecord};
pub use ui::controller::{SubmissionController, SubmissionState};
