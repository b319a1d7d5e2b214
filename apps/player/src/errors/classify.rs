use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::ActionError;
use crate::action::Action;

pub const INVALID_RESPONSE_DATA: &str = "Invalid response data";
pub const INVALID_STATUS_DATA: &str = "Invalid status data";

/// Body of every error response: `{error}` or `{error, details}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: &impl Serialize) -> Self {
        Self {
            error: error.into(),
            details: Some(serde_json::to_value(details).unwrap_or(JsonValue::Null)),
        }
    }
}

/// Map a handler failure to its HTTP status and body.
///
/// Validation failures become 400 for actions that declare a schema. Status
/// keeps answering 500 for them, with the details attached. Start-game and
/// use-ability have no validation branch at all. Everything else is a 500
/// carrying the action's static message.
pub fn classify(error: &ActionError, action: Action) -> (StatusCode, ErrorBody) {
    if let Some(validation) = error.as_validation() {
        if action.schema().is_some() {
            return (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details(INVALID_RESPONSE_DATA, validation),
            );
        }
        if action == Action::Status {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details(INVALID_STATUS_DATA, validation),
            );
        }
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new(action.failure_message()),
    )
}
