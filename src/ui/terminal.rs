//! Terminal mode switching for the TUI
//!
//! Raw mode is entered before the alternate screen; once it is on, every
//! exit path (including a failed setup) must switch it back off.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

pub type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Run `setup`; if it fails, run `restore` before returning the error
///
/// A restore failure is logged and the setup error is returned.
pub fn setup_or_restore<T, E, R>(
    setup: impl FnOnce() -> Result<T, E>,
    restore: impl FnOnce() -> Result<(), R>,
) -> Result<T, E>
where
    R: std::fmt::Display,
{
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(restore_err) = restore() {
                warn!(error = %restore_err, "terminal restore failed");
            }
            Err(e)
        }
    }
}

/// Enter raw mode and the alternate screen
pub fn setup_terminal() -> io::Result<TuiTerminal> {
    enable_raw_mode()?;
    setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        restore_terminal,
    )
}

/// Leave raw mode and the alternate screen
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
