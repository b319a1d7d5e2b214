use std::sync::Arc;

use crate::agent::PlayerAgent;
use crate::langfuse::TelemetryFlusher;

pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// The single agent instance for this process
    agent: Arc<dyn PlayerAgent>,
    flusher: TelemetryFlusher,
    max_body_bytes: usize,
    /// Log request bodies and responses at debug level
    log_payloads: bool,
}

impl AppState {
    pub fn new(agent: Arc<dyn PlayerAgent>, flusher: TelemetryFlusher) -> Self {
        Self {
            agent,
            flusher,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_payloads: true,
        }
    }

    pub fn with_limits(mut self, max_body_bytes: usize, log_payloads: bool) -> Self {
        self.max_body_bytes = max_body_bytes;
        self.log_payloads = log_payloads;
        self
    }

    pub fn agent(&self) -> &dyn PlayerAgent {
        self.agent.as_ref()
    }

    pub fn flusher(&self) -> &TelemetryFlusher {
        &self.flusher
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn log_payloads(&self) -> bool {
        self.log_payloads
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("flusher", &self.flusher)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_payloads", &self.log_payloads)
            .finish_non_exhaustive()
    }
}
