use std::sync::Arc;

use tracing::{debug, error};

use super::client::{NoopTelemetry, TelemetryClient};

/// Best-effort post-call flush of buffered telemetry.
///
/// Whether flushing happens at all is decided once, when the flusher is built.
/// Failures are logged and never reach the caller.
#[derive(Clone)]
pub struct TelemetryFlusher {
    client: Arc<dyn TelemetryClient>,
    enabled: bool,
}

impl TelemetryFlusher {
    pub fn new(client: Arc<dyn TelemetryClient>, enabled: bool) -> Self {
        Self { client, enabled }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopTelemetry), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn flush(&self) {
        if !self.enabled {
            return;
        }

        match self.client.flush().await {
            Ok(()) => debug!("telemetry flushed"),
            Err(err) => error!(error = %err, "telemetry flush failed"),
        }
    }
}

impl std::fmt::Debug for TelemetryFlusher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryFlusher")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
