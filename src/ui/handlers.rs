//! TUI command handlers
//!
//! Routes parsed input bar content. Analysis requests go through the
//! submit gate; local commands only touch the activity console.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::ui::input::{is_local_command, parse_command, render_help, Command};
use crate::ui::state::App;

/// Route a key press
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+C exits from any state
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char(c) => app.handle_char(c),
        KeyCode::Backspace => app.handle_backspace(),
        KeyCode::Esc => app.clear_input(),
        KeyCode::Enter => handle_enter(app),
        _ => {}
    }
}

/// Handle an Enter press on the input bar
///
/// The input buffer is kept for analysis requests (the user can re-submit
/// or refine it) and cleared only for local commands.
pub fn handle_enter(app: &mut App) {
    let is_command = is_local_command(&app.input_buffer);
    let cmd = parse_command(&app.input_buffer);
    execute_command(app, cmd);
    if is_command {
        app.clear_input();
    }
}

/// Execute a parsed command
pub fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::None => {}
        Command::Quit => {
            app.log("Exiting...");
            app.quit();
        }
        Command::Help => {
            for line in render_help() {
                app.log(line);
            }
        }
        Command::Status => app.request_health(),
        Command::Analyze(query) => handle_analyze(app, &query),
    }
}

/// Forward the submit gesture to the controller
///
/// Ignored while a request is in flight; this is the only guard against
/// overlapping submissions from the UI.
pub fn handle_analyze(app: &mut App, query: &str) {
    if app.is_loading() {
        debug!("submit ignored while loading");
        return;
    }
    if let Some(id) = app.submit(query) {
        debug!(id, "submit forwarded");
    }
}
