//! Wire types and errors for the query endpoint.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a remote query.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// No response was received (connection refused, reset, timeout).
    #[error("query request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("query failed with status {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("query response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl QueryError {
    /// Human-readable text shown in the chat's error line.
    ///
    /// Server errors echo the backend's own message; everything else embeds
    /// the underlying error text.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Server { message, .. } => format!("Error: {message}"),
            Self::Transport(detail) | Self::Decode(detail) | Self::HttpClientBuild(detail) => {
                format!("An error occurred: {detail}")
            }
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Request body: `{ "query": "..." }`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response body. Success and error responses share the `response` field.
#[derive(Debug, Default, Deserialize)]
pub struct QueryReply {
    #[serde(default)]
    pub response: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
