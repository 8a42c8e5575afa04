//! Remote analysis service access
//!
//! Transport-agnostic client for the `/analyze` endpoint plus the worker
//! threads that run requests off the UI thread.

pub mod client;
pub mod events;
pub mod record;
pub mod transport;
pub mod transport_fake;
pub mod transport_http;
pub mod transport_types;
pub mod worker;

// Re-export common types
pub use client::{AnalysisClient, AnalysisOutcome, FailureCause, HealthError, ServiceStatus};
pub use events::{AnalysisEvent, AnalysisReceiver, AnalysisSender, SubmissionId};
pub use record::{format_amount, NutritionRecord, RecordError};
pub use transport::{FakeTransport, HttpTransport, Transport};
pub use transport_types::{HttpResponse, SyncTransport, TransportError};
pub use worker::{spawn_analysis_thread, spawn_health_thread, AnalysisThreadHandle};
