use std::sync::Arc;

use tracing::info;

use super::app_state::AppState;
use crate::agent::{registry, PlayerAgent};
use crate::config::{ConfigError, PlayerConfig};
use crate::langfuse::{TelemetryBackend, TelemetryFlusher};

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    config: Option<PlayerConfig>,
    agent: Option<Arc<dyn PlayerAgent>>,
    flusher: Option<TelemetryFlusher>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take limits, telemetry and the agent choice from a validated config.
    pub fn with_config(mut self, config: &PlayerConfig) -> Self {
        self.config = Some(config.clone());
        self
    }

    /// Use this agent instead of building one from the registry.
    pub fn with_agent(mut self, agent: Arc<dyn PlayerAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Use this flusher instead of deriving one from the telemetry config.
    pub fn with_flusher(mut self, flusher: TelemetryFlusher) -> Self {
        self.flusher = Some(flusher);
        self
    }

    pub fn build(self) -> Result<AppState, ConfigError> {
        let backend = match &self.config {
            Some(config) => TelemetryBackend::from_config(&config.telemetry),
            None => TelemetryBackend::disabled(),
        };

        let agent = match (self.agent, &self.config) {
            (Some(agent), _) => agent,
            (None, Some(config)) => {
                let factory = registry::by_name(&config.agent.kind).ok_or_else(|| {
                    ConfigError::Invalid(format!("unknown agent '{}'", config.agent.kind))
                })?;
                info!(agent = factory.name, version = factory.version, "agent created");
                (factory.make)(&config.agent, backend.sink.clone())
            }
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "an agent or a config to build one from is required".to_string(),
                ))
            }
        };

        let flusher = self.flusher.unwrap_or(backend.flusher);
        let state = AppState::new(agent, flusher);
        Ok(match &self.config {
            Some(config) => {
                state.with_limits(config.server.max_body_bytes, config.logging.log_payloads)
            }
            None => state,
        })
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
