//! Player test support utilities
//!
//! Helpers shared by the player's unit and integration tests: unified logging
//! initialization and assertions for the JSON error contract.

pub mod error_body;
pub mod logging;
