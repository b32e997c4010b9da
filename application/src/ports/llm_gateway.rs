//! LLM Gateway port
//!
//! The boundary to the external decision collaborator. The engine hands it
//! a fully built prompt and receives free-form text back; it owns no
//! knowledge of transports, models, or credentials. Implementations
//! (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a collaborator invocation
///
/// All of these are recoverable at the ballot level: the collector retries
/// and then falls back, so a failing collaborator degrades a vote, never a
/// round.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for one-shot completions from the decision collaborator.
///
/// Votes are single-turn exchanges, so the port is a single call rather
/// than a session: each invocation is independent and carries its full
/// context in the prompt.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a system + user prompt pair, returning the raw reply text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, GatewayError>;
}
