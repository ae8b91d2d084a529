/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Plain text, sent as a user turn
    Submit(String),
    /// `/copy`
    Copy,
    /// `/transcript`
    Transcript,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Any other slash command
    Unknown(String),
}

/// Map one input line to an action
///
/// Blank lines still come back as `Submit`; the controller rejects them.
/// A leading `//` sends the rest of the line as text with a single `/`.
pub fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.starts_with("//") {
        let text = line.trim_start().trim_end_matches(['\r', '\n']);
        return InputAction::Submit(text[1..].to_string());
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return InputAction::Submit(line.trim_end_matches(['\r', '\n']).to_string());
    };

    match command.to_lowercase().as_str() {
        "copy" | "c" => InputAction::Copy,
        "transcript" | "t" => InputAction::Transcript,
        "help" | "h" | "?" => InputAction::Help,
        "quit" | "exit" | "q" => InputAction::Quit,
        _ => InputAction::Unknown(trimmed.to_string()),
    }
}
