//! How to register an agent
//!
//! 1) Implement `PlayerAgent` for your type in its module.
//! 2) Add an `AgentFactory` entry to the static list with a stable `name` and `version`.
//! 3) `PLAYER_AGENT` selects the entry by `name` at startup.

use std::sync::Arc;

use crate::agent::{PlayerAgent, RandomAgent};
use crate::config::AgentConfig;
use crate::langfuse::TraceSink;

/// Factory definition for constructing agent implementations.
pub struct AgentFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AgentConfig, traces: Arc<dyn TraceSink>) -> Arc<dyn PlayerAgent>,
}

static AGENT_FACTORIES: &[AgentFactory] = &[AgentFactory {
    name: RandomAgent::NAME,
    version: RandomAgent::VERSION,
    make: make_random_agent,
}];

pub fn registered_agents() -> &'static [AgentFactory] {
    AGENT_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static AgentFactory> {
    registered_agents().iter().find(|factory| factory.name == name)
}

fn make_random_agent(config: &AgentConfig, traces: Arc<dyn TraceSink>) -> Arc<dyn PlayerAgent> {
    Arc::new(RandomAgent::new(config.persona.clone(), config.seed, traces))
}
