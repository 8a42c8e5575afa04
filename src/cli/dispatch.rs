//! CLI mode dispatch
//!
//! One-shot modes that do not start the terminal UI:
//! - analyze: run one submission through the controller and print it
//! - status: probe the service health endpoint

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalysisClient, HttpTransport, NutritionRecord};
use crate::cli::config::Settings;
use crate::cli::{Mode, Result, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use crate::ui::controller::SubmissionController;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Build a client backed by the real HTTP transport
pub fn build_client(settings: &Settings) -> Result<AnalysisClient> {
    let transport = HttpTransport::with_timeout(settings.request_timeout)?;
    Ok(AnalysisClient::new(transport, settings.base_url.clone()))
}

/// Run a one-shot mode and return the exit code
///
/// `Mode::Tui` is handled by the binary; passing it here is a usage error.
pub fn run_cli_mode(mode: Mode, settings: &Settings) -> ExitCode {
    let client = match build_client(settings) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_USAGE;
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let result = match mode {
        Mode::Analyze { ref query, json } => run_analyze(
            &client,
            &query.join(" "),
            json,
            &mut stdout.lock(),
            &mut stderr.lock(),
        ),
        Mode::Status => run_status(&client, &mut stdout.lock(), &mut stderr.lock()),
        Mode::Tui => {
            eprintln!("Error: tui mode cannot run as a one-shot command");
            return EXIT_USAGE;
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
}

/// Analyze `query` once and print the outcome
pub fn run_analyze<W: Write, E: Write>(
    client: &AnalysisClient,
    query: &str,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> Result<ExitCode> {
    let mut controller = SubmissionController::new();
    let Some(submission) = controller.submit(query) else {
        writeln!(err, "Nothing to analyze: query is empty")?;
        return Ok(EXIT_USAGE);
    };

    let outcome = client.analyze(&submission.query);
    controller.settle(submission.id, outcome);

    if let Some(record) = controller.result() {
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
        } else {
            write_record(out, record)?;
        }
        info!(item = %record.item_name, "one-shot analysis printed");
        return Ok(EXIT_SUCCESS);
    }

    let message = controller.error().unwrap_or_default();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ErrorOutput { error: message })?)?;
    } else {
        writeln!(err, "Error: {}", message)?;
    }
    Ok(EXIT_FAILURE)
}

/// Human-readable record
pub fn write_record<W: Write>(out: &mut W, record: &NutritionRecord) -> std::io::Result<()> {
    writeln!(out, "{}", record.item_name)?;
    writeln!(out, "  Calories: {}", record.calories_display())?;
    writeln!(out, "  Protein:  {}", NutritionRecord::grams_display(record.protein))?;
    writeln!(out, "  Carbs:    {}", NutritionRecord::grams_display(record.carbs))?;
    writeln!(out, "  Fat:      {}", NutritionRecord::grams_display(record.fat))?;
    writeln!(out, "  Tip:      {}", record.health_tip)?;
    Ok(())
}

/// Probe the service and print its status
pub fn run_status<W: Write, E: Write>(
    client: &AnalysisClient,
    out: &mut W,
    err: &mut E,
) -> Result<ExitCode> {
    match client.health() {
        Ok(status) => {
            writeln!(out, "Service: {}", client.base_url())?;
            writeln!(out, "Status:  {}", status.status.as_deref().unwrap_or("unknown"))?;
            writeln!(out, "Model:   {}", status.model.as_deref().unwrap_or("unknown"))?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            writeln!(err, "Service {} unreachable: {}", client.base_url(), e)?;
            Ok(EXIT_FAILURE)
        }
    }
}
