use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::ValidationError;
use crate::agent::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub speech: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub target: PlayerId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastWordsResponse {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    Speech,
    Vote,
    LastWords,
}

impl ResponseSchema {
    pub fn name(self) -> &'static str {
        match self {
            ResponseSchema::Speech => "speech",
            ResponseSchema::Vote => "vote",
            ResponseSchema::LastWords => "last-words",
        }
    }

    /// Check `value` against the schema and return its canonical form.
    /// Keys the schema does not declare are dropped.
    pub fn parse(self, value: JsonValue) -> Result<JsonValue, ValidationError> {
        match self {
            ResponseSchema::Speech => parse_as::<SpeechResponse>(self.name(), value),
            ResponseSchema::Vote => parse_as::<VoteResponse>(self.name(), value),
            ResponseSchema::LastWords => parse_as::<LastWordsResponse>(self.name(), value),
        }
    }
}

fn parse_as<T>(schema: &'static str, value: JsonValue) -> Result<JsonValue, ValidationError>
where
    T: DeserializeOwned + Serialize,
{
    let parsed: T =
        serde_json::from_value(value).map_err(|e| ValidationError::from_serde(schema, &e))?;
    serde_json::to_value(&parsed).map_err(|e| ValidationError::from_serde(schema, &e))
}
