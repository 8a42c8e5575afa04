//! Input bar parsing
//!
//! Two lanes:
//! A) COMMAND: the whole input (trimmed) is one of the command words
//!    - Handled locally, never sent to the analysis service
//!    - /quit, /q, /exit, /help, /h, /status
//! B) ANALYZE: everything else, including other text starting with "/"
//!    - The raw text (untrimmed) becomes the query

/// Parsed input bar content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,            // /quit, /q, /exit
    Help,            // /help, /h
    Status,          // /status
    Analyze(String), // Default: meal description
}

/// Parse input bar content into a Command
///
/// # Examples
/// ```
/// use macroai::ui::input::{parse_command, Command};
///
/// assert_eq!(parse_command("/quit"), Command::Quit);
/// assert_eq!(parse_command("/q"), Command::Quit);
/// assert_eq!(parse_command("/help"), Command::Help);
/// assert_eq!(parse_command("   "), Command::None);
/// assert_eq!(
///     parse_command("two eggs and toast"),
///     Command::Analyze("two eggs and toast".to_string())
/// );
/// assert_eq!(
///     parse_command("/2 cup rice"),
///     Command::Analyze("/2 cup rice".to_string())
/// );
/// ```
pub fn parse_command(input: &str) -> Command {
    match input.trim() {
        "" => Command::None,
        "/quit" | "/q" | "/exit" => Command::Quit,
        "/help" | "/h" => Command::Help,
        "/status" => Command::Status,
        _ => Command::Analyze(input.to_string()),
    }
}

/// Returns true if `input` is handled locally instead of being analyzed
pub fn is_local_command(input: &str) -> bool {
    matches!(
        parse_command(input),
        Command::Quit | Command::Help | Command::Status
    )
}

/// Help text shown by /help
pub fn render_help() -> Vec<&'static str> {
    vec![
        "Type a meal description and press Enter to analyze it.",
        "Esc clears the input, Ctrl+C quits.",
        "/status  check the analysis service",
        "/help    show this help",
        "/quit    exit (also /q, /exit)",
    ]
}
