//! Binary wiring tests
//!
//! Spawns the built `macroai` binary for the one-shot modes.

mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use common::{blocking, sandwich_json, unreachable_base_url, HEALTHY};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary isolated from the caller's config and environment
fn macroai(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_macroai"))
        .current_dir(dir)
        .env_remove("MACROAI_CONFIG")
        .env_remove("MACROAI_BASE_URL")
        .env_remove("MACROAI_TIMEOUT_SECS")
        .env_remove("MACROAI_LOG")
        .arg("--log-dir")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run macroai")
}

/// Run the binary on a blocking thread so the mock server keeps answering
async fn run(dir: PathBuf, args: Vec<String>) -> Output {
    blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        macroai(&dir, &args)
    })
    .await
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

async fn mount_analyze(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = macroai(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("macroai "));
}

#[tokio::test]
async fn test_analyze_success_prints_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({ "query": "grilled chicken sandwich" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sandwich_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run(
        dir.path().to_path_buf(),
        args(&[
            "--base-url",
            &mock_server.uri(),
            "analyze",
            "grilled",
            "chicken",
            "sandwich",
        ]),
    )
    .await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Grilled Chicken Sandwich"));
    assert!(text.contains("520"));
    assert!(text.contains("18g"));
}

#[tokio::test]
async fn test_analyze_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let mock_server = MockServer::start().await;
    mount_analyze(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sandwich_json()),
    )
    .await;

    let output = run(
        dir.path().to_path_buf(),
        args(&["--base-url", &mock_server.uri(), "analyze", "--json", "sandwich"]),
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["item_name"], "Grilled Chicken Sandwich");
    assert_eq!(value["calories"], 520.0);
}

#[tokio::test]
async fn test_analyze_rate_limited_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mock_server = MockServer::start().await;
    mount_analyze(&mock_server, ResponseTemplate::new(429)).await;

    let output = run(
        dir.path().to_path_buf(),
        args(&["--base-url", &mock_server.uri(), "analyze", "soup"]),
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Traffic is high. Please try again in 10s."));
}

#[test]
fn test_analyze_unreachable_service() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = unreachable_base_url();
    let output = macroai(dir.path(), &["--base-url", &base_url, "analyze", "soup"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Server connection failed. Is backend running?"));
}

#[test]
fn test_whitespace_query_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = unreachable_base_url();
    let output = macroai(dir.path(), &["--base-url", &base_url, "analyze", "   "]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_base_url_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = macroai(dir.path(), &["--base-url", "ftp://nope", "status"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = macroai(dir.path(), &["--no-such-flag"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--no-such-flag"));
}

#[tokio::test]
async fn test_status_reports_service() {
    let dir = tempfile::tempdir().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HEALTHY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run(
        dir.path().to_path_buf(),
        args(&["--base-url", &mock_server.uri(), "status"]),
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("MacroAI is running"));
}

#[tokio::test]
async fn test_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sandwich_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    std::fs::write(
        dir.path().join("macroai.toml"),
        format!("[service]\nbase_url = \"{}\"\n", mock_server.uri()),
    )
    .unwrap();

    let output = run(dir.path().to_path_buf(), args(&["analyze", "sandwich"])).await;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}
