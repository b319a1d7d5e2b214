//! Langfuse ingestion client.
//!
//! Agent decisions are buffered as `trace-create` events and shipped in one
//! batch per flush to `{base_url}/api/public/ingestion`.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("telemetry endpoint rejected batch with status {status}")]
    Rejected { status: u16 },
}

/// One agent decision worth tracing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEvent {
    pub name: String,
    pub input: JsonValue,
    pub output: JsonValue,
}

impl TraceEvent {
    pub fn new(name: impl Into<String>, input: JsonValue, output: JsonValue) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

/// Receives trace events from the agent.
pub trait TraceSink: Send + Sync {
    fn record(&self, event: TraceEvent);
}

/// Pushes buffered telemetry to the backend.
#[async_trait]
pub trait TelemetryClient: Send + Sync {
    async fn flush(&self) -> Result<(), TelemetryError>;
}

/// Sink and client used when no credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TraceSink for NoopTelemetry {
    fn record(&self, _event: TraceEvent) {}
}

#[async_trait]
impl TelemetryClient for NoopTelemetry {
    async fn flush(&self) -> Result<(), TelemetryError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct IngestionEvent {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: String,
    body: TraceBody,
}

#[derive(Debug, Clone, Serialize)]
struct TraceBody {
    id: String,
    timestamp: String,
    name: String,
    input: JsonValue,
    output: JsonValue,
}

#[derive(Serialize)]
struct IngestionBatch<'a> {
    batch: &'a [IngestionEvent],
}

pub struct LangfuseClient {
    http: reqwest::Client,
    ingestion_url: String,
    public_key: String,
    secret_key: String,
    pending: Mutex<Vec<IngestionEvent>>,
}

impl LangfuseClient {
    pub fn new(base_url: &str, public_key: &str, secret_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            ingestion_url: format!("{}/api/public/ingestion", base_url.trim_end_matches('/')),
            public_key: public_key.to_string(),
            secret_key: secret_key.to_string(),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn ingestion_url(&self) -> &str {
        &self.ingestion_url
    }

    /// Number of events waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }
}

impl TraceSink for LangfuseClient {
    fn record(&self, event: TraceEvent) {
        let timestamp = now_rfc3339();
        let trace_id = Uuid::new_v4().to_string();
        self.pending.lock().push(IngestionEvent {
            id: Uuid::new_v4().to_string(),
            kind: "trace-create",
            timestamp: timestamp.clone(),
            body: TraceBody {
                id: trace_id,
                timestamp,
                name: event.name,
                input: event.input,
                output: event.output,
            },
        });
    }
}

#[async_trait]
impl TelemetryClient for LangfuseClient {
    async fn flush(&self) -> Result<(), TelemetryError> {
        // Events are dropped once taken; a failed batch is not retried.
        let batch = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .post(&self.ingestion_url)
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .json(&IngestionBatch { batch: &batch })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
