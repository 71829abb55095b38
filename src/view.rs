//! Terminal rendering of store snapshots.
//!
//! DESIGN
//! ======
//! Rendering is pure: functions take a `StoreSnapshot` and return text, so
//! the REPL in `main.rs` only wires a `watch` receiver to stdout.
//! `TerminalView` remembers what it already printed and emits only the new
//! lines for each snapshot, which suits a scrolling terminal.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::fmt::Write as _;

use crate::state::{ChatSession, Message, StoreSnapshot};

pub const BRAND: &str = "Mechanic AI";
pub const TYPING_INDICATOR: &str = "Typing...";
const TITLE_MAX_CHARS: usize = 32;

/// Sidebar: brand, "Previous Chats", one line per session with the selected
/// one marked. Empty when the sidebar is hidden.
#[must_use]
pub fn render_sidebar(snapshot: &StoreSnapshot) -> String {
    if !snapshot.sidebar_visible {
        return String::new();
    }

    let mut out = format!("{BRAND}\nPrevious Chats\n");
    if snapshot.sessions.is_empty() {
        out.push_str("  (none yet, /new starts one)\n");
        return out;
    }
    for (index, session) in snapshot.sessions.iter().enumerate() {
        let marker = if snapshot.selected == Some(index) { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {}. {}", index + 1, session_title(session));
    }
    out
}

/// Full thread of the selected chat, followed by the typing indicator and
/// error line when present.
#[must_use]
pub fn render_thread(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();
    for message in snapshot.active_messages() {
        out.push_str(&render_message(message));
        out.push('\n');
    }
    if snapshot.pending {
        out.push_str(&typing_line());
        out.push('\n');
    }
    if let Some(error) = &snapshot.error {
        out.push_str(&error_line(error));
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_message(message: &Message) -> String {
    format!("{}: {}", message.sender().label(), message.text())
}

/// Sidebar label: the first non-blank line of the chat's first user message,
/// cut to `TITLE_MAX_CHARS`. An ellipsis marks any hidden text.
#[must_use]
pub fn session_title(session: &ChatSession) -> String {
    let Some(title) = session.title() else {
        return "New chat".to_owned();
    };
    let mut lines = title.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(first_line) = lines.next() else {
        return "New chat".to_owned();
    };
    let more_lines = lines.next().is_some();
    if first_line.chars().count() <= TITLE_MAX_CHARS && !more_lines {
        return first_line.to_owned();
    }
    let short: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    format!("{short}...")
}

fn typing_line() -> String {
    format!("{}: {TYPING_INDICATOR}", crate::state::Sender::Bot.label())
}

fn error_line(error: &str) -> String {
    format!("! {error}")
}

// =============================================================================
// INCREMENTAL VIEW
// =============================================================================

/// Tracks what has been printed and yields only new lines per snapshot.
#[derive(Debug, Default)]
pub struct TerminalView {
    selected: Option<usize>,
    printed: usize,
    pending_shown: bool,
    error_seq: u64,
}

impl TerminalView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print to bring the terminal up to date with `snapshot`.
    pub fn update(&mut self, snapshot: &StoreSnapshot) -> Vec<String> {
        let mut lines = Vec::new();
        let messages = snapshot.active_messages();

        if snapshot.selected != self.selected {
            self.selected = snapshot.selected;
            self.printed = 0;
            self.pending_shown = false;
            if let Some(index) = snapshot.selected {
                lines.push(format!("--- chat {} ---", index + 1));
            }
        }

        for message in messages.iter().skip(self.printed) {
            lines.push(render_message(message));
        }
        self.printed = messages.len();

        if snapshot.pending && !self.pending_shown {
            lines.push(typing_line());
        }
        self.pending_shown = snapshot.pending;

        if snapshot.error_seq != self.error_seq {
            if let Some(error) = &snapshot.error {
                lines.push(error_line(error));
            }
            self.error_seq = snapshot.error_seq;
        }

        lines
    }
}
