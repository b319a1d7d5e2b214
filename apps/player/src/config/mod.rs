pub mod player;

pub use player::{
    AgentConfig, ConfigError, LoggingConfig, PlayerConfig, ServerConfig, TelemetryConfig,
};
