//! Shared test helpers

#![allow(dead_code)]

use std::net::TcpListener;

pub const SANDWICH: &str = r#"{"item_name":"Grilled Chicken Sandwich","calories":520,"protein":38,"carbs":45,"fat":18,"health_tip":"Pair with a vegetable side."}"#;

pub const HEALTHY: &str = r#"{"status":"MacroAI is running","model":"models/gemini-flash-latest"}"#;

/// Parsed `SANDWICH`, for `ResponseTemplate::set_body_json`
pub fn sandwich_json() -> serde_json::Value {
    serde_json::from_str(SANDWICH).expect("SANDWICH is valid JSON")
}

/// Run blocking client code off the async test runtime
///
/// The blocking reqwest client must not run on a runtime worker, and the
/// mock server needs the runtime free to answer. Panics inside `f` are
/// re-raised so assertion messages survive.
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => value,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => panic!("blocking task failed: {}", e),
    }
}

/// A localhost URL nobody listens on
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
