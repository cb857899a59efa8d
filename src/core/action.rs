//! Player actions.
//!
//! `GameAction` is the closed set of things a player can ask the engine to
//! do. Every successful action is appended to the game's history as an
//! `ActionRecord`, so a game can be replayed from its seed and history.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::error::Result;

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The defending player (base, then shields, then the player).
    Player,
    /// A specific rested enemy unit.
    Unit(InstanceId),
}

/// Extra choices supplied when playing a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayOptions {
    /// Unit a pilot is paired with.
    pub attach_to_unit_id: Option<InstanceId>,
    /// Unit targeted by a command.
    pub target_unit_id: Option<InstanceId>,
}

impl PlayOptions {
    /// No extra choices.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Pair a pilot with `unit`.
    #[must_use]
    pub fn attach_to(unit: InstanceId) -> Self {
        Self {
            attach_to_unit_id: Some(unit),
            target_unit_id: None,
        }
    }

    /// Target `unit` with a command.
    #[must_use]
    pub fn target(unit: InstanceId) -> Self {
        Self {
            attach_to_unit_id: None,
            target_unit_id: Some(unit),
        }
    }
}

/// A complete game action.
///
/// ```
/// use rust_tcg::core::{AttackTarget, GameAction, InstanceId, PlayOptions};
///
/// let play = GameAction::PlayCard { card: InstanceId(12), options: PlayOptions::none() };
/// let attack = GameAction::DeclareAttack { attacker: InstanceId(3), target: AttackTarget::Player };
/// assert_ne!(play, attack);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    AdvancePhase,
    PlayCard {
        card: InstanceId,
        options: PlayOptions,
    },
    DeclareAttack {
        attacker: InstanceId,
        target: AttackTarget,
    },
    DeclareBlock {
        blocker: Option<InstanceId>,
    },
    PassPriority,
    DiscardForHandLimit {
        card: InstanceId,
    },
}

impl GameAction {
    /// Short verb used in logs and advice.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            GameAction::AdvancePhase => "advance",
            GameAction::PlayCard { .. } => "play",
            GameAction::DeclareAttack { .. } => "attack",
            GameAction::DeclareBlock { .. } => "block",
            GameAction::PassPriority => "pass",
            GameAction::DiscardForHandLimit { .. } => "discard",
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: GameAction,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

/// Boundary shape of an action result: `{ ok, error? }`.
///
/// Engine methods return `Result<()>`; this converts for callers that
/// want a flat status object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<()>> for ActionOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self { ok: true, error: None },
            Err(e) => Self {
                ok: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_outcome_from_ok() {
        let outcome = ActionOutcome::from(Ok(()));
        assert!(outcome.ok);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_outcome_from_err() {
        let outcome = ActionOutcome::from(Err(EngineError::GameOver));
        assert!(!outcome.ok);
        assert_eq!(outcome.error.as_deref(), Some("game is already over"));
    }

    #[test]
    fn test_outcome_json_omits_missing_error() {
        let json = serde_json::to_string(&ActionOutcome::from(Ok(()))).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_action_serialization() {
        let action = GameAction::PlayCard {
            card: InstanceId(5),
            options: PlayOptions::target(InstanceId(9)),
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
