//! Message submission flow: user input -> store -> backend -> store.
//!
//! DESIGN
//! ======
//! `submit` does its store work synchronously (append the user message,
//! clear the draft, enter pending) and only then spawns the remote call, so
//! the user's message always precedes its reply. The spawned task folds the
//! outcome back into the session the submission was appended to.
//!
//! Overlapping submissions are not serialized. Each one is independent and
//! replies land in whatever order the backend answers.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::net::QueryBackend;
use crate::state::{SharedStore, StoreError};

/// Front door for every user action that changes chat state.
#[derive(Clone)]
pub struct ChatController {
    store: SharedStore,
    backend: Arc<dyn QueryBackend>,
}

impl ChatController {
    #[must_use]
    pub fn new(store: SharedStore, backend: Arc<dyn QueryBackend>) -> Self {
        Self { store, backend }
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Start a new empty chat and select it.
    pub fn new_chat(&self) -> usize {
        self.store.lock().new_chat()
    }

    /// Switch to the chat at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `index` is out of range.
    pub fn select_chat(&self, index: usize) -> Result<(), StoreError> {
        self.store.lock().select_chat(index)
    }

    /// Replace the draft buffer.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.store.lock().set_draft(text);
    }

    /// Show or hide the chat list.
    pub fn toggle_sidebar(&self) {
        self.store.lock().toggle_sidebar();
    }

    /// Submit `text` to the active chat.
    ///
    /// Whitespace-only input is ignored and returns `None`. Otherwise the
    /// user message is appended before this returns, and the handle resolves
    /// once the reply (or error) has been written to the store. Must be
    /// called from within a Tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        if text.trim().is_empty() {
            debug!("submit: empty input ignored");
            return None;
        }

        let ticket = self.store.lock().begin_submission(text.to_owned());
        info!(session = %ticket.session_id, query_len = text.len(), "submit: query dispatched");

        let store = self.store.clone();
        let backend = Arc::clone(&self.backend);
        let query = text.to_owned();
        Some(tokio::spawn(async move {
            let result = backend.query(&query).await;
            match result {
                Ok(reply) => {
                    info!(session = %ticket.session_id, reply_len = reply.len(), "submit: reply received");
                    store.lock().resolve_reply(ticket, reply);
                }
                Err(e) => {
                    warn!(session = %ticket.session_id, error = %e, "submit: query failed");
                    store.lock().fail_submission(ticket, e.display_message());
                }
            }
        }))
    }

    /// Submit whatever is in the store's draft buffer.
    pub fn submit_draft(&self) -> Option<JoinHandle<()>> {
        let draft = self.store.lock().draft().to_owned();
        self.submit(&draft)
    }
}
