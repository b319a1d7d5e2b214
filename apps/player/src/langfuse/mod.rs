//! Langfuse telemetry: trace buffering for the agent and the post-call flusher.

mod client;
mod flusher;

use std::sync::Arc;

pub use client::{
    LangfuseClient, NoopTelemetry, TelemetryClient, TelemetryError, TraceEvent, TraceSink,
};
pub use flusher::TelemetryFlusher;

use crate::config::TelemetryConfig;

/// The telemetry handles handed to the agent (sink) and the boundary (flusher).
#[derive(Clone)]
pub struct TelemetryBackend {
    pub sink: Arc<dyn TraceSink>,
    pub flusher: TelemetryFlusher,
}

impl TelemetryBackend {
    /// Langfuse when both credentials are present, otherwise a no-op backend.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        match config.credentials() {
            Some((public_key, secret_key)) => {
                let client = Arc::new(LangfuseClient::new(&config.base_url, public_key, secret_key));
                Self {
                    sink: client.clone(),
                    flusher: TelemetryFlusher::new(client, true),
                }
            }
            None => Self::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: Arc::new(NoopTelemetry),
            flusher: TelemetryFlusher::disabled(),
        }
    }
}
