//! Response schemas for agent output.
//!
//! Speech, vote and last-words results are checked for their exact fields and
//! types before they leave the process. A failed check yields a [`ValidationError`], which the classifier
//! turns into a 400 with the issues attached as `details`.

mod schemas;

use serde::Serialize;
use thiserror::Error;

pub use schemas::{LastWordsResponse, ResponseSchema, SpeechResponse, VoteResponse};

/// Kind tag carried in serialized validation failures.
pub const VALIDATION_ERROR_NAME: &str = "ValidationError";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field path from the response root; empty when the whole value is wrong.
    pub path: Vec<String>,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{schema} response failed validation with {} issue(s)", .issues.len())]
pub struct ValidationError {
    pub name: &'static str,
    pub schema: &'static str,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(schema: &'static str, issues: Vec<ValidationIssue>) -> Self {
        Self {
            name: VALIDATION_ERROR_NAME,
            schema,
            issues,
        }
    }

    /// Shape errors: missing fields, wrong types, a non-object value.
    pub fn from_serde(schema: &'static str, err: &serde_json::Error) -> Self {
        Self::new(
            schema,
            vec![ValidationIssue {
                path: Vec::new(),
                code: "invalid_type".to_string(),
                message: err.to_string(),
            }],
        )
    }
}
