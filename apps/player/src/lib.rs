#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod action;
pub mod agent;
pub mod app;
pub mod config;
pub mod errors;
pub mod langfuse;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

// Re-exports for public API
pub use action::Action;
pub use agent::{AgentError, PlayerAgent, RandomAgent};
pub use app::build_app;
pub use config::PlayerConfig;
pub use errors::{ActionError, ErrorBody};
pub use langfuse::{TelemetryBackend, TelemetryFlusher, TraceEvent, TraceSink};
pub use middleware::{ErrorGuard, PermissiveCors, StructuredLogger};
pub use state::{build_state, AppState};
pub use validation::{ResponseSchema, ValidationError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    player_test_support::logging::init();
}
