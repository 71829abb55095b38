//! HTTP client for the mechanic answering backend.

use reqwest::StatusCode;
use tracing::{debug, warn};

use super::types::{QueryError, QueryReply, QueryRequest};
use crate::config::ChatConfig;

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Answers one chat query. Enables mocking in tests.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Send `query` to the backend and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the request fails, the backend answers
    /// with an error status, or the body cannot be decoded.
    async fn query(&self, query: &str) -> Result<String, QueryError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpQueryClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ChatConfig) -> Result<Self, QueryError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.timeouts.connect());
        if let Some(timeout) = config.timeouts.request() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| QueryError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.endpoint.clone() })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl QueryBackend for HttpQueryClient {
    async fn query(&self, query: &str) -> Result<String, QueryError> {
        debug!(endpoint = %self.endpoint, query_len = query.len(), "query: sending");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let result = parse_reply(status, &body);
        if let Err(e) = &result {
            warn!(status = status.as_u16(), error = %e, "query: failed");
        }
        result
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Turn a status + body into reply text or a typed error.
///
/// Error statuses use the body's `response` field when present, falling back
/// to the status reason so the user still sees something meaningful.
pub(crate) fn parse_reply(status: StatusCode, body: &str) -> Result<String, QueryError> {
    if !status.is_success() {
        let message = serde_json::from_str::<QueryReply>(body)
            .ok()
            .and_then(|reply| reply.response)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
            });
        return Err(QueryError::Server { status: status.as_u16(), message });
    }

    let reply: QueryReply = serde_json::from_str(body).map_err(|e| QueryError::Decode(e.to_string()))?;
    reply
        .response
        .ok_or_else(|| QueryError::Decode("missing `response` field".to_owned()))
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
