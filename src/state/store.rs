//! Session store: chat history, selection, and submission status.
//!
//! DESIGN
//! ======
//! Every public mutation ends in `publish()`, which pushes a fresh
//! `StoreSnapshot` into a `watch` channel. Views hold a receiver and
//! re-render on change; they never reach into the store directly.
//!
//! The pending flag is an in-flight counter. Overlapping submissions are
//! allowed and race; the store stays pending until all of them resolve.
//!
//! Sessions sit behind an `Arc`, so snapshots share history with the store
//! and only message appends copy it. Draft and sidebar updates are cheap.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::message::{ChatSession, Message};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by session store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A chat index outside `0..len` was requested.
    #[error("invalid argument: chat index {index} out of range ({len} chats)")]
    InvalidArgument { index: usize, len: usize },
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Observable store state handed to subscribers after each mutation.
#[derive(Clone, Debug, Default)]
pub struct StoreSnapshot {
    pub sessions: Arc<Vec<ChatSession>>,
    pub selected: Option<usize>,
    pub pending: bool,
    pub error: Option<String>,
    /// Bumped by every failed submission. Identical error text from two
    /// failures still reads as two distinct errors.
    pub error_seq: u64,
    pub draft: String,
    pub sidebar_visible: bool,
}

impl StoreSnapshot {
    /// Messages of the selected session, empty when nothing is selected.
    #[must_use]
    pub fn active_messages(&self) -> &[Message] {
        self.selected
            .and_then(|i| self.sessions.get(i))
            .map(ChatSession::messages)
            .unwrap_or_default()
    }
}

// =============================================================================
// SUBMISSION TICKET
// =============================================================================

/// Identifies the session a submission was appended to, so the reply lands
/// in the same thread even if the user switches chats while it is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub session: usize,
    pub session_id: Uuid,
}

// =============================================================================
// SESSION STORE
// =============================================================================

pub struct SessionStore {
    sessions: Arc<Vec<ChatSession>>,
    selected: Option<usize>,
    in_flight: usize,
    error: Option<String>,
    error_seq: u64,
    draft: String,
    sidebar_visible: bool,
    notify: watch::Sender<StoreSnapshot>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = watch::channel(StoreSnapshot { sidebar_visible: true, ..StoreSnapshot::default() });
        Self {
            sessions: Arc::new(Vec::new()),
            selected: None,
            in_flight: 0,
            error: None,
            error_seq: 0,
            draft: String::new(),
            sidebar_visible: true,
            notify,
        }
    }

    /// Append an empty chat, select it, and return its index.
    pub fn new_chat(&mut self) -> usize {
        let session = ChatSession::new();
        let session_id = session.id();
        Arc::make_mut(&mut self.sessions).push(session);
        let index = self.sessions.len() - 1;
        self.selected = Some(index);
        info!(index, session = %session_id, "store: new chat");
        self.publish();
        index
    }

    /// Select the chat at `index`; the active sequence becomes its messages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `index` is out of range.
    /// The store is left unchanged.
    pub fn select_chat(&mut self, index: usize) -> Result<(), StoreError> {
        let len = self.sessions.len();
        if index >= len {
            warn!(index, len, "store: select out of range");
            return Err(StoreError::InvalidArgument { index, len });
        }
        self.selected = Some(index);
        debug!(index, "store: chat selected");
        self.publish();
        Ok(())
    }

    #[must_use]
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Messages of the selected session, empty when nothing is selected.
    #[must_use]
    pub fn active_messages(&self) -> &[Message] {
        self.selected
            .and_then(|i| self.sessions.get(i))
            .map(ChatSession::messages)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.publish();
    }

    #[must_use]
    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        self.publish();
    }

    /// Subscribe to snapshots. The receiver starts at the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.notify.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            sessions: Arc::clone(&self.sessions),
            selected: self.selected,
            pending: self.is_pending(),
            error: self.error.clone(),
            error_seq: self.error_seq,
            draft: self.draft.clone(),
            sidebar_visible: self.sidebar_visible,
        }
    }

    // -------------------------------------------------------------------------
    // Submission hooks
    // -------------------------------------------------------------------------

    /// Append the user's message to the active chat and enter pending.
    ///
    /// Opens a new chat when none is selected. Clears the draft and any
    /// error left by an earlier submission.
    pub(crate) fn begin_submission(&mut self, text: String) -> PendingSubmission {
        let session = match self.selected {
            Some(index) => index,
            None => self.new_chat(),
        };
        let chat = &mut Arc::make_mut(&mut self.sessions)[session];
        chat.push(Message::user(text));
        let session_id = chat.id();
        self.draft.clear();
        self.error = None;
        self.in_flight += 1;
        debug!(session = %session_id, in_flight = self.in_flight, "store: submission pending");
        self.publish();
        PendingSubmission { session, session_id }
    }

    /// Append the bot reply to the originating chat and leave pending.
    pub(crate) fn resolve_reply(&mut self, ticket: PendingSubmission, text: String) {
        if let Some(chat) = Arc::make_mut(&mut self.sessions).get_mut(ticket.session) {
            chat.push(Message::bot(text));
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(session = %ticket.session_id, in_flight = self.in_flight, "store: reply appended");
        self.publish();
    }

    /// Record a failed submission. The user message stays in place.
    pub(crate) fn fail_submission(&mut self, ticket: PendingSubmission, message: String) {
        self.error = Some(message);
        self.error_seq += 1;
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(session = %ticket.session_id, in_flight = self.in_flight, "store: submission failed");
        self.publish();
    }

    fn publish(&self) {
        self.notify.send_replace(self.snapshot());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SHARED HANDLE
// =============================================================================

/// Cloneable handle shared by the submission flow and the view.
///
/// The lock is only held for short synchronous mutations, never across an
/// `.await`.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<SessionStore>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    /// Lock the store, recovering from poisoning. Each mutation is a single
    /// synchronous step, so a poisoned store is still consistent.
    pub fn lock(&self) -> MutexGuard<'_, SessionStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.lock().subscribe()
    }
}
