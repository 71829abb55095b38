//! Line commands accepted by the terminal front-end.

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

pub const HELP: &str = "\
/new         start a new chat
/chats       list previous chats
/select N    switch to chat N
/sidebar     show or hide the chat list
/help        show this help
/quit        exit
anything else is sent to the mechanic";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    NewChat,
    ListChats,
    /// Zero-based chat index (the user types one-based numbers).
    Select(usize),
    ToggleSidebar,
    Help,
    Quit,
    /// Text to submit. May be whitespace-only; the submission flow ignores it.
    Submit(String),
    Invalid(String),
}

#[must_use]
pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplCommand::Submit(line.trim_end_matches(['\r', '\n']).to_owned());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("new"), None, _) => ReplCommand::NewChat,
        (Some("chats"), None, _) => ReplCommand::ListChats,
        (Some("sidebar"), None, _) => ReplCommand::ToggleSidebar,
        (Some("help"), None, _) => ReplCommand::Help,
        (Some("quit" | "exit"), None, _) => ReplCommand::Quit,
        (Some("select"), Some(n), None) => match n.parse::<usize>() {
            Ok(number) if number >= 1 => ReplCommand::Select(number - 1),
            _ => ReplCommand::Invalid(format!("not a chat number: {n}")),
        },
        _ => ReplCommand::Invalid(format!("unknown command: {trimmed}")),
    }
}
