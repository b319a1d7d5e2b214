//! Failures an action handler can run into.

pub mod classify;

use actix_web::error::PayloadError;
use thiserror::Error;

pub use classify::{classify, ErrorBody, INVALID_RESPONSE_DATA, INVALID_STATUS_DATA};

use crate::agent::AgentError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("failed to read request body: {0}")]
    Body(#[from] PayloadError),
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("malformed request payload: {0}")]
    Payload(serde_json::Error),
    #[error("failed to encode agent result: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ActionError {
    /// The schema-validation kind, as opposed to every other failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ActionError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
