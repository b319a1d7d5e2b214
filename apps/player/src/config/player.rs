//! Player process configuration.
//!
//! Everything comes from environment variables set by the runtime:
//! - Docker: via `env_file` or `docker run --env-file`
//! - Local dev: source an env file manually (e.g., `set -a; . ./.env; set +a`)

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::agent::registry;

pub const PLAYER_HOST: &str = "PLAYER_HOST";
pub const PLAYER_PORT: &str = "PLAYER_PORT";
pub const PLAYER_AGENT: &str = "PLAYER_AGENT";
pub const PLAYER_AGENT_SEED: &str = "PLAYER_AGENT_SEED";
pub const PLAYER_NAME: &str = "PLAYER_NAME";
pub const PLAYER_LOG_PAYLOADS: &str = "PLAYER_LOG_PAYLOADS";
pub const PLAYER_MAX_BODY_BYTES: &str = "PLAYER_MAX_BODY_BYTES";
pub const LANGFUSE_PUBLIC_KEY: &str = "LANGFUSE_PUBLIC_KEY";
pub const LANGFUSE_SECRET_KEY: &str = "LANGFUSE_SECRET_KEY";
pub const LANGFUSE_BASEURL: &str = "LANGFUSE_BASEURL";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_AGENT: &str = "random";
const DEFAULT_NAME: &str = "Player";
const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
const DEFAULT_LANGFUSE_BASEURL: &str = "https://cloud.langfuse.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not valid: {reason}")]
    Parse { var: &'static str, reason: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request bodies larger than this are rejected by the handler.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Registered agent name, see [`registry::registered_agents`].
    pub kind: String,
    pub seed: Option<u64>,
    /// Name the agent uses for itself when speaking.
    pub persona: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log request bodies and responses at debug level.
    pub log_payloads: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: String,
}

impl TelemetryConfig {
    /// Both keys, or nothing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.public_key.as_deref(), self.secret_key.as_deref()) {
            (Some(public_key), Some(secret_key)) => Some((public_key, secret_key)),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub server: ServerConfig,
    pub agent: AgentConfig,
    pub logging: LoggingConfig,
    pub telemetry: TelemetryConfig,
}

impl PlayerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            server: ServerConfig {
                host: get(PLAYER_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_or(PLAYER_PORT, get(PLAYER_PORT), DEFAULT_PORT)?,
                max_body_bytes: parse_or(
                    PLAYER_MAX_BODY_BYTES,
                    get(PLAYER_MAX_BODY_BYTES),
                    DEFAULT_MAX_BODY_BYTES,
                )?,
            },
            agent: AgentConfig {
                kind: get(PLAYER_AGENT).unwrap_or_else(|| DEFAULT_AGENT.to_string()),
                seed: get(PLAYER_AGENT_SEED)
                    .map(|raw| parse(PLAYER_AGENT_SEED, &raw))
                    .transpose()?,
                persona: get(PLAYER_NAME).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            },
            logging: LoggingConfig {
                log_payloads: get(PLAYER_LOG_PAYLOADS)
                    .map(|raw| parse_bool(PLAYER_LOG_PAYLOADS, &raw))
                    .transpose()?
                    .unwrap_or(true),
            },
            telemetry: TelemetryConfig {
                public_key: get(LANGFUSE_PUBLIC_KEY),
                secret_key: get(LANGFUSE_SECRET_KEY),
                base_url: get(LANGFUSE_BASEURL)
                    .unwrap_or_else(|| DEFAULT_LANGFUSE_BASEURL.to_string()),
            },
        })
    }

    /// Semantic checks; the process must not serve requests if this fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(format!("{PLAYER_PORT} must not be 0")));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(format!(
                "{PLAYER_MAX_BODY_BYTES} must be greater than 0"
            )));
        }
        if registry::by_name(&self.agent.kind).is_none() {
            let known: Vec<&str> = registry::registered_agents()
                .iter()
                .map(|factory| factory.name)
                .collect();
            return Err(ConfigError::Invalid(format!(
                "unknown agent '{}' (registered: {})",
                self.agent.kind,
                known.join(", ")
            )));
        }
        if self.agent.persona.is_empty() {
            return Err(ConfigError::Invalid(format!("{PLAYER_NAME} must not be empty")));
        }
        let base_url = &self.telemetry.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "{LANGFUSE_BASEURL} must be an http(s) URL, got '{base_url}'"
            )));
        }
        Ok(())
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::Parse {
        var,
        reason: format!("'{raw}': {e}"),
    })
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |raw| parse(var, &raw))
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse {
            var,
            reason: format!("'{raw}' is not a boolean"),
        }),
    }
}
