//! # mechanic-chat
//!
//! Chat client for the car mechanic assistant. A single session store holds
//! the chat history, the selected chat and the submission status; the
//! submission flow posts queries to the answering backend and folds replies
//! back into the store. Views subscribe to store snapshots and render them.

pub mod config;
pub mod net;
pub mod repl;
pub mod state;
pub mod submit;
pub mod view;
