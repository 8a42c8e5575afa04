//! MacroAI CLI
//!
//! - (no mode) / tui: interactive terminal UI
//! - analyze <query>: one-shot analysis
//! - status: service health probe
//!
//! EXIT: Ctrl+C or /quit from the TUI

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event};
use ratatui::Terminal;
use tracing::{info, warn};

use macroai::cli::{
    build_client, init_logging, parse_args, run_cli_mode, Error, Mode, Settings, EXIT_USAGE,
};
use macroai::ui::terminal::{restore_terminal, setup_terminal};
use macroai::ui::{handlers, App, AppState};

/// Input poll interval; settlements are drained once per tick
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        // clap prints help/version on stdout and usage errors on stderr
        Err(Error::InvalidArgs(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let log_guard = match init_logging(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled ({})", e);
            None
        }
    };
    info!(base_url = %settings.base_url, "macroai starting");

    let mode = args.mode.clone().unwrap_or(Mode::Tui);
    if mode != Mode::Tui {
        let code = run_cli_mode(mode, &settings);
        // process::exit skips destructors; flush the log writer first
        drop(log_guard);
        std::process::exit(code);
    }

    run_tui_mode(&settings)
}

/// Run TUI mode
fn run_tui_mode(settings: &Settings) -> Result<()> {
    let client = build_client(settings).context("failed to create HTTP client")?;
    let mut app = App::new(client);
    app.log(format!("Analysis service: {}", settings.base_url));
    app.log("Describe a meal and press Enter. /help for commands, Ctrl+C to quit.");

    let mut terminal = setup_terminal().context("failed to set up terminal")?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    restore_terminal()?;
    terminal.show_cursor()?;

    if app.active_workers() > 0 {
        warn!(
            in_flight = app.active_workers(),
            "exiting with requests in flight; their settlements are dropped"
        );
    }
    info!("macroai finished");
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    while app.state() != AppState::Quitting {
        macroai::ui::render(terminal, app)?;

        if poll(TICK)? {
            if let Event::Key(key) = read()? {
                handlers::handle_key_event(app, key);
            }
        }

        app.process_analysis_events();
    }
    Ok(())
}
