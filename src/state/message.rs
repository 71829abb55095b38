#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Bot => "mechanic",
        }
    }
}

/// A single turn in a conversation. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }

    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One conversation thread. Callers address sessions by their position in
/// the store; `id` only correlates log lines.
#[derive(Clone, Debug)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<Message>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), messages: Vec::new() }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Text of the first user message, used as the sidebar title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.sender == Sender::User)
            .map(Message::text)
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
