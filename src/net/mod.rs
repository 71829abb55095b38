//! Remote query capability.
//!
//! DESIGN
//! ======
//! `QueryBackend` is the seam between the submission flow and the network.
//! `HttpQueryClient` is the production implementation (reqwest, one JSON
//! `POST` per query); tests substitute their own backend.

pub mod query;
pub mod types;

pub use query::{HttpQueryClient, QueryBackend};
pub use types::{QueryError, QueryReply, QueryRequest};
