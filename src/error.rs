//! Error types for the duel engine.
//!
//! Every rejected action maps to one variant. Rejections are raised before
//! any state is touched, so an `Err` always means "nothing happened".

use thiserror::Error;

use crate::core::{InstanceId, Phase, PlayerId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("game is already over")]
    GameOver,

    #[error("invalid decks: {}", .0.join("; "))]
    InvalidDecks(Vec<String>),

    #[error("cannot {action} during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("{0} does not hold priority")]
    NoPriority(PlayerId),

    #[error("{0} is not the active player")]
    NotActivePlayer(PlayerId),

    #[error("card {0} is not in hand")]
    NotInHand(InstanceId),

    #[error("{0} cannot be played from hand")]
    NotPlayable(String),

    #[error("unknown card instance {0}")]
    UnknownInstance(InstanceId),

    #[error("level {required} required but only {available} resources in play")]
    LevelTooLow { required: u32, available: u32 },

    #[error("cost {required} required but only {available} active resources")]
    CannotPay { required: u32, available: u32 },

    #[error("illegal attack: {0}")]
    IllegalAttack(String),

    #[error("illegal block: {0}")]
    IllegalBlock(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("{0} requires a target unit")]
    MissingTarget(String),

    #[error("battle area is full")]
    BattleAreaFull,

    #[error("no discard is pending")]
    NoPendingDiscard,

    #[error("effect script failed: {0}")]
    Script(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<bincode::Error> for EngineError {
    fn from(e: bincode::Error) -> Self {
        EngineError::Encoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_decks_lists_every_violation() {
        let err = EngineError::InvalidDecks(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "invalid decks: first; second");
    }

    #[test]
    fn test_wrong_phase_message() {
        let err = EngineError::WrongPhase {
            action: "advance",
            phase: Phase::Main,
        };
        assert_eq!(err.to_string(), "cannot advance during the main phase");
    }
}
