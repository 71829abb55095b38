//! Client-side chat state.
//!
//! DESIGN
//! ======
//! One `SessionStore` is the single source of truth. The active message
//! sequence is computed from the selected session rather than kept as a
//! second copy, so the thread a view renders can never drift from history.
//! Views observe the store through `watch` snapshots (store -> view).

pub mod message;
pub mod store;

pub use message::{ChatSession, Message, Sender};
pub use store::{SessionStore, SharedStore, StoreError, StoreSnapshot};
