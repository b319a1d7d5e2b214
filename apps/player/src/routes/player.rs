//! Player action handlers.
//!
//! Each call reads the body, awaits the agent, flushes telemetry when the
//! action produced model output, validates the result against the action's
//! schema and replies. Failures are classified here and never leave the handler.

use actix_web::{web, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info};

use crate::action::Action;
use crate::agent::{AgentInput, PlayerAgent};
use crate::errors::{classify, ActionError};
use crate::state::AppState;

pub const START_GAME_MESSAGE: &str = "Game started successfully";

pub(crate) async fn handle(
    action: Action,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> HttpResponse {
    info!(action = action.name(), "action requested");

    match run(action, &state, payload).await {
        Ok(body) => {
            if state.log_payloads() {
                debug!(action = action.name(), response = %body, "action completed");
            }
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            error!(action = action.name(), error = %err, "action failed");
            let (status, body) = classify(&err, action);
            HttpResponse::build(status).json(body)
        }
    }
}

async fn run(
    action: Action,
    state: &AppState,
    payload: web::Payload,
) -> Result<JsonValue, ActionError> {
    let body = if action.reads_body() {
        read_body(payload, state.max_body_bytes()).await?
    } else {
        JsonValue::Null
    };
    if state.log_payloads() {
        debug!(action = action.name(), body = %body, "request body");
    }

    let result = invoke(action, state.agent(), body).await?;

    if action.flushes_telemetry() {
        state.flusher().flush().await;
    }

    match action.schema() {
        Some(schema) => Ok(schema.parse(result)?),
        None => Ok(result),
    }
}

/// Bodies are forwarded as-is; the agent decides whether they make sense.
async fn invoke(
    action: Action,
    agent: &dyn PlayerAgent,
    body: JsonValue,
) -> Result<JsonValue, ActionError> {
    let input = AgentInput(body);
    let result = match action {
        Action::StartGame => {
            agent.start_game(input).await?;
            json!({ "message": START_GAME_MESSAGE, "langfuseEnabled": true })
        }
        Action::Speak => {
            let speech = agent.speak(input).await?;
            json!({ "speech": speech })
        }
        Action::Vote => agent.vote(input).await?,
        Action::UseAbility => agent.use_ability(input).await?,
        Action::LastWords => {
            let content = agent.last_words().await?;
            json!({ "content": content })
        }
        Action::Status => serde_json::to_value(agent.status()?).map_err(ActionError::Encode)?,
    };
    Ok(result)
}

/// Collect the body. An empty (or whitespace-only) body reads as `null`.
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<JsonValue, ActionError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(ActionError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Null);
    }
    serde_json::from_slice(&body).map_err(ActionError::Payload)
}
