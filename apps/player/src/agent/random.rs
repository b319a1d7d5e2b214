//! Random agent: plays legal but uninformed werewolf moves.
//!
//! [`RandomAgent`] is the reference implementation of [`PlayerAgent`]. It
//! remembers the started game, picks targets uniformly among eligible players
//! and speaks from a small set of templates. Seeding makes it reproducible.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::prelude::*;
use serde_json::{json, Value as JsonValue};

use super::trait_def::{AgentError, PlayerAgent};
use super::types::{
    AgentInfo, AgentInput, NightAction, NightActionKind, PlayerContext, PlayerId, Role,
    StartGameParams, StatusSnapshot, WitchAction, WitchActionKind,
};
use crate::langfuse::{TraceEvent, TraceSink};

const SPEECH_TEMPLATES: &[&str] = &[
    "I have been watching player {target} closely and their story does not add up.",
    "Player {target} has been too quiet. I would like to hear them explain themselves.",
    "My gut says player {target} is hiding something, but I am open to other views.",
];

const QUIET_SPEECH: &str = "There is not much to go on yet. I will listen before I accuse anyone.";

#[derive(Debug, Clone)]
struct GameSession {
    params: StartGameParams,
    is_alive: bool,
}

pub struct RandomAgent {
    persona: String,
    rng: Mutex<StdRng>,
    session: Mutex<Option<GameSession>>,
    traces: Arc<dyn TraceSink>,
}

impl RandomAgent {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` gives reproducible decisions; `None` draws from OS entropy.
    pub fn new(persona: impl Into<String>, seed: Option<u64>, traces: Arc<dyn TraceSink>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            persona: persona.into(),
            rng: Mutex::new(rng),
            session: Mutex::new(None),
            traces,
        }
    }

    fn session(&self) -> Result<GameSession, AgentError> {
        self.session
            .lock()
            .map_err(|e| AgentError::Internal(format!("session lock poisoned: {e}")))?
            .clone()
            .ok_or(AgentError::NotStarted)
    }

    fn pick(&self, candidates: &[PlayerId]) -> Result<Option<PlayerId>, AgentError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AgentError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(candidates.choose(&mut *rng).copied())
    }

    /// Alive players this agent may target: never itself, and never a fellow werewolf.
    fn eligible_targets(session: &GameSession, context: &PlayerContext) -> Vec<PlayerId> {
        let params = &session.params;
        context
            .alive_ids()
            .into_iter()
            .filter(|id| *id != params.player_id)
            .filter(|id| params.role != Role::Werewolf || !params.teammates.contains(id))
            .collect()
    }

    fn trace(&self, name: &str, input: JsonValue, output: &JsonValue) {
        self.traces
            .record(TraceEvent::new(name, input, output.clone()));
    }

    fn decide_speech(&self, context: &PlayerContext) -> Result<String, AgentError> {
        let session = self.session()?;
        let targets = Self::eligible_targets(&session, context);
        let speech = match self.pick(&targets)? {
            Some(target) => {
                let template = self.pick_template()?;
                template.replace("{target}", &target.to_string())
            }
            None => QUIET_SPEECH.to_string(),
        };
        Ok(format!("{} here. {speech}", self.persona))
    }

    fn pick_template(&self) -> Result<&'static str, AgentError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AgentError::Internal(format!("RNG lock poisoned: {e}")))?;
        SPEECH_TEMPLATES
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AgentError::Internal("no speech templates".into()))
    }

    fn decide_vote(&self, context: &PlayerContext) -> Result<JsonValue, AgentError> {
        let session = self.session()?;
        let targets = Self::eligible_targets(&session, context);
        let target = self
            .pick(&targets)?
            .ok_or_else(|| AgentError::InvalidContext("no eligible vote target".into()))?;
        Ok(json!({
            "target": target,
            "reason": format!("Player {target} has the weakest story this round."),
        }))
    }

    fn decide_ability(&self, context: &AgentInput) -> Result<JsonValue, AgentError> {
        let session = self.session()?;

        let decision = match session.params.role {
            Role::Villager => return Err(AgentError::NoAbility(Role::Villager)),
            Role::Werewolf => {
                let ctx = context.as_player().map_err(invalid)?;
                let targets = Self::eligible_targets(&session, &ctx);
                let action = match self.pick(&targets)? {
                    Some(target) => NightAction {
                        action: NightActionKind::Kill,
                        target: Some(target),
                        reason: format!("Player {target} is a threat to the pack."),
                    },
                    None => NightAction {
                        action: NightActionKind::Idle,
                        target: None,
                        reason: "No one left to hunt.".into(),
                    },
                };
                to_json(&action)?
            }
            Role::Seer => {
                let ctx = context.as_seer().map_err(invalid)?;
                let checked: Vec<PlayerId> =
                    ctx.investigated_players.values().map(|i| i.target).collect();
                let targets: Vec<PlayerId> = Self::eligible_targets(&session, &ctx.base)
                    .into_iter()
                    .filter(|id| !checked.contains(id))
                    .collect();
                let action = match self.pick(&targets)? {
                    Some(target) => NightAction {
                        action: NightActionKind::Investigate,
                        target: Some(target),
                        reason: format!("Player {target} has not been checked yet."),
                    },
                    None => NightAction {
                        action: NightActionKind::Idle,
                        target: None,
                        reason: "Everyone left has already been checked.".into(),
                    },
                };
                to_json(&action)?
            }
            Role::Witch => {
                let ctx = context.as_witch().map_err(invalid)?;
                let action = match ctx.killed_tonight {
                    Some(victim) if !ctx.potion_used.heal => WitchAction {
                        action: WitchActionKind::Using,
                        heal_target: Some(victim),
                        heal_reason: format!("Player {victim} should not die tonight."),
                        poison_target: None,
                        poison_reason: String::new(),
                    },
                    _ => WitchAction {
                        action: WitchActionKind::Idle,
                        heal_target: None,
                        heal_reason: String::new(),
                        poison_target: None,
                        poison_reason: String::new(),
                    },
                };
                to_json(&action)?
            }
        };
        Ok(decision)
    }

    fn decide_last_words(&self) -> Result<String, AgentError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| AgentError::Internal(format!("session lock poisoned: {e}")))?;
        let session = guard.as_mut().ok_or(AgentError::NotStarted)?;
        session.is_alive = false;
        let role = session.params.role;
        Ok(format!(
            "{} signing off. I was a {role}; think carefully about who pushed hardest for my exit.",
            self.persona
        ))
    }
}

fn invalid(e: serde_json::Error) -> AgentError {
    AgentError::InvalidContext(e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsonValue, AgentError> {
    serde_json::to_value(value).map_err(|e| AgentError::Internal(e.to_string()))
}

#[async_trait]
impl PlayerAgent for RandomAgent {
    async fn start_game(&self, input: AgentInput) -> Result<(), AgentError> {
        let params = input.as_start_params().map_err(invalid)?;
        {
            let mut session = self
                .session
                .lock()
                .map_err(|e| AgentError::Internal(format!("session lock poisoned: {e}")))?;
            *session = Some(GameSession {
                params,
                is_alive: true,
            });
        }
        self.trace("start-game", input.into_inner(), &JsonValue::Null);
        Ok(())
    }

    async fn speak(&self, input: AgentInput) -> Result<JsonValue, AgentError> {
        let context = input.as_player().map_err(invalid)?;
        let speech = JsonValue::from(self.decide_speech(&context)?);
        self.trace("speak", input.into_inner(), &speech);
        Ok(speech)
    }

    async fn vote(&self, input: AgentInput) -> Result<JsonValue, AgentError> {
        let context = input.as_player().map_err(invalid)?;
        let vote = self.decide_vote(&context)?;
        self.trace("vote", input.into_inner(), &vote);
        Ok(vote)
    }

    async fn use_ability(&self, input: AgentInput) -> Result<JsonValue, AgentError> {
        let decision = self.decide_ability(&input)?;
        self.trace("use-ability", input.into_inner(), &decision);
        Ok(decision)
    }

    async fn last_words(&self) -> Result<JsonValue, AgentError> {
        let words = JsonValue::from(self.decide_last_words()?);
        self.trace("last-words", JsonValue::Null, &words);
        Ok(words)
    }

    fn status(&self) -> Result<StatusSnapshot, AgentError> {
        let session = self
            .session
            .lock()
            .map_err(|e| AgentError::Internal(format!("session lock poisoned: {e}")))?
            .clone();
        let agent = AgentInfo {
            name: Self::NAME.to_string(),
            version: Self::VERSION.to_string(),
        };
        Ok(match session {
            Some(s) => StatusSnapshot {
                game_id: Some(s.params.game_id),
                player_id: Some(s.params.player_id),
                role: Some(s.params.role),
                teammates: s.params.teammates,
                is_alive: s.is_alive,
                agent,
            },
            None => StatusSnapshot {
                game_id: None,
                player_id: None,
                role: None,
                teammates: Vec::new(),
                is_alive: true,
                agent,
            },
        })
    }
}
