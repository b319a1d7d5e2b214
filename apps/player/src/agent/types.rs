//! Wire types exchanged with the game master.
//!
//! The game master speaks camelCase JSON. Context records are lenient: every
//! field has a default so that partially filled contexts still reach the agent.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Villager,
    Werewolf,
    Seer,
    Witch,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Villager => "villager",
            Role::Werewolf => "werewolf",
            Role::Seer => "seer",
            Role::Witch => "witch",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Preparing,
    Night,
    Day,
    Voting,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameParams {
    pub game_id: String,
    pub player_id: PlayerId,
    pub role: Role,
    #[serde(default)]
    pub teammates: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub is_alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speech {
    pub player_id: PlayerId,
    pub content: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub voter_id: PlayerId,
    pub target_id: PlayerId,
}

/// What every player sees when asked to act. Keys of the speech and vote maps
/// are round numbers as sent by the game master.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerContext {
    pub round: u32,
    pub current_phase: GamePhase,
    pub alive_players: Vec<PlayerInfo>,
    pub all_speeches: BTreeMap<String, Vec<Speech>>,
    pub all_votes: BTreeMap<String, Vec<Vote>>,
}

impl PlayerContext {
    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.alive_players
            .iter()
            .filter(|p| p.is_alive)
            .map(|p| p.id)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PotionUsed {
    pub heal: bool,
    pub poison: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitchContext {
    #[serde(flatten)]
    pub base: PlayerContext,
    #[serde(default)]
    pub killed_tonight: Option<PlayerId>,
    #[serde(default)]
    pub potion_used: PotionUsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    pub target: PlayerId,
    pub is_good: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeerContext {
    #[serde(flatten)]
    pub base: PlayerContext,
    #[serde(default)]
    pub investigated_players: BTreeMap<String, Investigation>,
}

/// Raw request body handed to the agent.
///
/// The boundary forwards it untouched; only the agent decides what shape it
/// expects, through the typed views below.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInput(pub JsonValue);

impl AgentInput {
    pub fn as_start_params(&self) -> Result<StartGameParams, serde_json::Error> {
        StartGameParams::deserialize(&self.0)
    }

    pub fn as_player(&self) -> Result<PlayerContext, serde_json::Error> {
        PlayerContext::deserialize(&self.0)
    }

    pub fn as_witch(&self) -> Result<WitchContext, serde_json::Error> {
        WitchContext::deserialize(&self.0)
    }

    pub fn as_seer(&self) -> Result<SeerContext, serde_json::Error> {
        SeerContext::deserialize(&self.0)
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NightActionKind {
    Kill,
    Investigate,
    Idle,
}

/// Night action of a werewolf or a seer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightAction {
    pub action: NightActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WitchActionKind {
    Using,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitchAction {
    pub action: WitchActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heal_target: Option<PlayerId>,
    pub heal_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poison_target: Option<PlayerId>,
    pub poison_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub game_id: Option<String>,
    pub player_id: Option<PlayerId>,
    pub role: Option<Role>,
    pub teammates: Vec<PlayerId>,
    pub is_alive: bool,
    pub agent: AgentInfo,
}
