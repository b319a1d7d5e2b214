//! The six actions a game master can ask of the player.

use crate::validation::ResponseSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StartGame,
    Speak,
    Vote,
    UseAbility,
    LastWords,
    Status,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::StartGame,
        Action::Speak,
        Action::Vote,
        Action::UseAbility,
        Action::LastWords,
        Action::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::StartGame => "start-game",
            Action::Speak => "speak",
            Action::Vote => "vote",
            Action::UseAbility => "use-ability",
            Action::LastWords => "last-words",
            Action::Status => "status",
        }
    }

    /// Status ignores its body entirely; every other action reads and logs it.
    pub fn reads_body(self) -> bool {
        self != Action::Status
    }

    /// Schema the agent's result must satisfy before it is sent.
    pub fn schema(self) -> Option<ResponseSchema> {
        match self {
            Action::Speak => Some(ResponseSchema::Speech),
            Action::Vote => Some(ResponseSchema::Vote),
            Action::LastWords => Some(ResponseSchema::LastWords),
            Action::StartGame | Action::UseAbility | Action::Status => None,
        }
    }

    /// Actions that ran the model flush telemetry once the agent call succeeds.
    pub fn flushes_telemetry(self) -> bool {
        matches!(
            self,
            Action::Speak | Action::Vote | Action::UseAbility | Action::LastWords
        )
    }

    /// Static message returned with every non-validation failure.
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::StartGame => "Failed to start game",
            Action::Speak => "Failed to generate speech",
            Action::Vote => "Failed to generate vote",
            Action::UseAbility => "Failed to use ability",
            Action::LastWords => "Failed to generate last words",
            Action::Status => "Failed to get status",
        }
    }
}
