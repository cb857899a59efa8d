//! Effect definitions.
//!
//! Effects are the primitive state changes a stack item can make. The set
//! is closed: resolution is an exhaustive `match`, so adding a variant
//! forces every resolver to handle it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{InstanceId, PlayerId};

/// An atomic game effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// A player draws cards.
    Draw { player: PlayerId, count: u32 },

    /// Damage dealt to a unit in play.
    DamageUnit { target: InstanceId, amount: i32 },

    /// Damage dealt to a player's base, if they have one.
    DamageBase { player: PlayerId, amount: i32 },

    /// A unit is destroyed outright.
    DestroyUnit { target: InstanceId },

    /// A single-use active resource is added to a player's resource area.
    CreateResource { player: PlayerId },

    /// Nothing happens except a log line.
    Log { message: String },
}

/// Effect lists are almost always one or two entries long.
pub type EffectList = SmallVec<[Effect; 2]>;

impl Effect {
    /// Create a draw effect.
    #[must_use]
    pub fn draw(player: PlayerId, count: u32) -> Self {
        Self::Draw { player, count }
    }

    /// Create a damage-to-unit effect.
    #[must_use]
    pub fn damage_unit(target: InstanceId, amount: i32) -> Self {
        Self::DamageUnit { target, amount }
    }

    /// Create a damage-to-base effect.
    #[must_use]
    pub fn damage_base(player: PlayerId, amount: i32) -> Self {
        Self::DamageBase { player, amount }
    }

    /// Create a destroy effect.
    #[must_use]
    pub fn destroy(target: InstanceId) -> Self {
        Self::DestroyUnit { target }
    }

    /// Create a temporary resource effect.
    #[must_use]
    pub fn create_resource(player: PlayerId) -> Self {
        Self::CreateResource { player }
    }

    /// Create a log-only effect.
    #[must_use]
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    /// The unit this effect needs to still be in play, if any.
    #[must_use]
    pub fn target_unit(&self) -> Option<InstanceId> {
        match self {
            Effect::DamageUnit { target, .. } | Effect::DestroyUnit { target } => Some(*target),
            Effect::Draw { .. }
            | Effect::DamageBase { .. }
            | Effect::CreateResource { .. }
            | Effect::Log { .. } => None,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Draw { player, count } => write!(f, "{player} draws {count}"),
            Effect::DamageUnit { target, amount } => write!(f, "{amount} damage to unit {target}"),
            Effect::DamageBase { player, amount } => write!(f, "{amount} damage to {player}'s base"),
            Effect::DestroyUnit { target } => write!(f, "destroy unit {target}"),
            Effect::CreateResource { player } => write!(f, "{player} gains a temporary resource"),
            Effect::Log { message } => f.write_str(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_unit() {
        assert_eq!(Effect::damage_unit(InstanceId(4), 2).target_unit(), Some(InstanceId(4)));
        assert_eq!(Effect::destroy(InstanceId(5)).target_unit(), Some(InstanceId(5)));
        assert_eq!(Effect::draw(PlayerId::ONE, 1).target_unit(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Effect::draw(PlayerId::TWO, 2).to_string(), "Player 2 draws 2");
        assert_eq!(Effect::damage_unit(InstanceId(3), 1).to_string(), "1 damage to unit #3");
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::damage_base(PlayerId::ONE, 5);
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
