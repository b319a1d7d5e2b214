//! Player agent module - the collaborator that decides what to say and do.
//!
//! This module provides:
//! - the `PlayerAgent` trait every agent implements
//! - werewolf wire types shared with the game master
//! - `RandomAgent`, a seedable reference agent
//! - a static registry used to pick the agent at startup

mod random;
pub mod registry;
mod trait_def;
pub mod types;

pub use random::RandomAgent;
pub use trait_def::{AgentError, PlayerAgent};
pub use types::{AgentInput, PlayerContext, Role, StartGameParams, StatusSnapshot};
