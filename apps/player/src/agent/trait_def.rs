//! Player agent trait definition.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::types::{AgentInput, Role, StatusSnapshot};

/// Errors that can occur while the agent decides.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("no game has been started")]
    NotStarted,
    #[error("role {0} has no night ability")]
    NoAbility(Role),
    #[error("invalid context: {0}")]
    InvalidContext(String),
    #[error("agent internal error: {0}")]
    Internal(String),
}

/// The game-playing agent behind the HTTP boundary.
///
/// Request bodies arrive as raw [`AgentInput`]; the agent, not the boundary,
/// decides whether they make sense. One instance lives for the whole process and is shared by every request,
/// so implementations must tolerate concurrent calls.
#[async_trait]
pub trait PlayerAgent: Send + Sync {
    /// Reset the agent for a new game. `input` carries the game-start parameters.
    async fn start_game(&self, input: AgentInput) -> Result<(), AgentError>;

    /// Produce this player's speech for the current round. The caller wraps the
    /// result as `{speech}` and checks it against the speech schema.
    async fn speak(&self, input: AgentInput) -> Result<JsonValue, AgentError>;

    /// Produce a vote. The result is checked against the vote schema by the caller.
    async fn vote(&self, input: AgentInput) -> Result<JsonValue, AgentError>;

    /// Use the role's night ability. The shape of the result depends on the role.
    async fn use_ability(&self, input: AgentInput) -> Result<JsonValue, AgentError>;

    /// Wrapped as `{content}` and checked against the last-words schema.
    async fn last_words(&self) -> Result<JsonValue, AgentError>;

    fn status(&self) -> Result<StatusSnapshot, AgentError>;
}
