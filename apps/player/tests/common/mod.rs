#![allow(dead_code)]

// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{test, web};
use async_trait::async_trait;
use player::action::Action;
use player::agent::{AgentError, AgentInput, PlayerAgent, StatusSnapshot};
use player::langfuse::{TelemetryClient, TelemetryError, TelemetryFlusher};
use player::state::AppState;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    player_test_support::logging::init();
}

/// What the stub agent does when an action reaches it.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Succeed with this value.
    Value(Value),
    Fail,
    Panic,
}

/// Scripted agent that records every call it receives.
pub struct StubAgent {
    replies: HashMap<Action, Reply>,
    calls: Mutex<Vec<(Action, Value)>>,
}

impl StubAgent {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, action: Action, reply: Reply) -> Self {
        self.replies.insert(action, reply);
        self
    }

    pub fn calls(&self) -> Vec<(Action, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn reply(&self, action: Action, input: Value) -> Result<Value, AgentError> {
        self.calls.lock().unwrap().push((action, input));
        match self.replies.get(&action).cloned() {
            Some(Reply::Value(value)) => Ok(value),
            Some(Reply::Fail) => Err(AgentError::Internal(format!(
                "scripted {} failure",
                action.name()
            ))),
            Some(Reply::Panic) => panic!("scripted {} panic", action.name()),
            None => Ok(default_reply(action)),
        }
    }
}

fn default_reply(action: Action) -> Value {
    match action {
        Action::StartGame => Value::Null,
        Action::Speak => json!("I am a simple villager."),
        Action::Vote => json!({ "target": 3, "reason": "quiet all game" }),
        Action::UseAbility => json!({ "action": "idle", "reason": "nothing to do" }),
        Action::LastWords => json!("Trust player 2."),
        Action::Status => json!({
            "gameId": "g-1",
            "playerId": 1,
            "role": "villager",
            "teammates": [],
            "isAlive": true,
            "agent": { "name": "stub", "version": "0.0.0" }
        }),
    }
}

#[async_trait]
impl PlayerAgent for StubAgent {
    async fn start_game(&self, input: AgentInput) -> Result<(), AgentError> {
        self.reply(Action::StartGame, input.into_inner()).map(|_| ())
    }

    async fn speak(&self, input: AgentInput) -> Result<Value, AgentError> {
        self.reply(Action::Speak, input.into_inner())
    }

    async fn vote(&self, input: AgentInput) -> Result<Value, AgentError> {
        self.reply(Action::Vote, input.into_inner())
    }

    async fn use_ability(&self, input: AgentInput) -> Result<Value, AgentError> {
        self.reply(Action::UseAbility, input.into_inner())
    }

    async fn last_words(&self) -> Result<Value, AgentError> {
        self.reply(Action::LastWords, Value::Null)
    }

    fn status(&self) -> Result<StatusSnapshot, AgentError> {
        let value = self.reply(Action::Status, Value::Null)?;
        serde_json::from_value(value).map_err(|e| AgentError::Internal(e.to_string()))
    }
}

/// Telemetry client that counts flushes and can be told to fail.
#[derive(Default)]
pub struct CountingTelemetry {
    flushes: AtomicUsize,
    fail: bool,
}

impl CountingTelemetry {
    pub fn failing() -> Self {
        Self {
            flushes: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetryClient for CountingTelemetry {
    async fn flush(&self) -> Result<(), TelemetryError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(TelemetryError::Rejected { status: 503 })
        } else {
            Ok(())
        }
    }
}

/// App state around `agent` with telemetry enabled and counted.
pub fn state_with(agent: Arc<StubAgent>, telemetry: Arc<CountingTelemetry>) -> web::Data<AppState> {
    let flusher = TelemetryFlusher::new(telemetry, true);
    web::Data::new(AppState::new(agent, flusher))
}

/// Build the full player app around a stub agent.
pub async fn init_app(
    agent: Arc<StubAgent>,
    telemetry: Arc<CountingTelemetry>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(player::build_app(state_with(agent, telemetry))).await
}

/// POST a JSON body to `/api/player/{action}`.
pub fn post_action(action: Action, body: &Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri(&format!("/api/player/{}", action.name()))
        .set_json(body)
        .to_request()
}

/// POST raw bytes (malformed or empty bodies) to `/api/player/{action}`.
pub fn post_raw(action: Action, body: &'static str) -> actix_http::Request {
    test::TestRequest::post()
        .uri(&format!("/api/player/{}", action.name()))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request()
}
