//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card in the current game. It
//! tracks mutable state like damage and the rested flag; its location is
//! owned by the zone lists, not by the instance.
//!
//! Pairing is recorded on both sides: if pilot A is attached to unit B
//! then `B.attached_pilot == Some(A)` and `A.attached_unit == Some(B)`.
//! Only `GameState::attach_pilot` and `GameState::detach` write these
//! fields so the two sides cannot drift apart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// Synthetic cards the engine creates itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// The base every player starts with.
    StartingBase,
    /// One-shot resource for the player going second.
    BonusResource,
    /// One-shot resource created by an effect.
    TemporaryResource,
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this instance.
    pub id: InstanceId,

    /// Owner (whose zones this card lives in).
    pub owner: PlayerId,

    /// Shared printed data.
    pub definition: Arc<CardDefinition>,

    pub rested: bool,

    /// Accumulated damage.
    pub damage: i32,

    /// Turn the card last entered play.
    pub entered_turn: Option<u32>,

    pub attached_pilot: Option<InstanceId>,

    pub attached_unit: Option<InstanceId>,

    pub link_active: bool,

    pub face_down: bool,

    pub token: Option<TokenKind>,
}

impl CardInstance {
    /// Create an instance of a printed card.
    #[must_use]
    pub fn new(id: InstanceId, owner: PlayerId, definition: Arc<CardDefinition>) -> Self {
        Self {
            id,
            owner,
            definition,
            rested: false,
            damage: 0,
            entered_turn: None,
            attached_pilot: None,
            attached_unit: None,
            link_active: false,
            face_down: false,
            token: None,
        }
    }

    /// Create a token instance.
    #[must_use]
    pub fn token(
        id: InstanceId,
        owner: PlayerId,
        definition: Arc<CardDefinition>,
        kind: TokenKind,
    ) -> Self {
        Self {
            token: Some(kind),
            ..Self::new(id, owner, definition)
        }
    }

    #[must_use]
    pub fn category(&self) -> CardCategory {
        self.definition.category
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.category() == CardCategory::Unit
    }

    /// Is this a resource token that leaves the game once spent?
    #[must_use]
    pub fn is_single_use_resource(&self) -> bool {
        matches!(
            self.token,
            Some(TokenKind::BonusResource | TokenKind::TemporaryResource)
        )
    }

    /// Forget everything the card picked up while in play.
    ///
    /// Attachments are not touched; callers detach first.
    pub fn reset_play_state(&mut self) {
        self.rested = false;
        self.damage = 0;
        self.entered_turn = None;
        self.link_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    fn unit() -> Arc<CardDefinition> {
        Arc::new(CardDefinition::unit("U-1", "GM", Color::White, 1, 1, 2, 2))
    }

    #[test]
    fn test_card_instance_new() {
        let instance = CardInstance::new(InstanceId(10), PlayerId::ONE, unit());

        assert_eq!(instance.id, InstanceId(10));
        assert_eq!(instance.owner, PlayerId::ONE);
        assert!(instance.is_unit());
        assert!(!instance.rested);
        assert!(instance.token.is_none());
    }

    #[test]
    fn test_single_use_tokens() {
        let def = Arc::new(CardDefinition::resource("EX", "EX Resource"));
        let bonus = CardInstance::token(InstanceId(1), PlayerId::TWO, def.clone(), TokenKind::BonusResource);
        let temp = CardInstance::token(InstanceId(2), PlayerId::TWO, def.clone(), TokenKind::TemporaryResource);
        let plain = CardInstance::new(InstanceId(3), PlayerId::TWO, def);

        assert!(bonus.is_single_use_resource());
        assert!(temp.is_single_use_resource());
        assert!(!plain.is_single_use_resource());
    }

    #[test]
    fn test_reset_play_state() {
        let mut instance = CardInstance::new(InstanceId(10), PlayerId::ONE, unit());
        instance.rested = true;
        instance.damage = 3;
        instance.entered_turn = Some(2);
        instance.link_active = true;

        instance.reset_play_state();

        assert!(!instance.rested);
        assert_eq!(instance.damage, 0);
        assert_eq!(instance.entered_turn, None);
        assert!(!instance.link_active);
    }

    #[test]
    fn test_card_instance_serialization() {
        let mut instance = CardInstance::new(InstanceId(10), PlayerId::ONE, unit());
        instance.damage = 3;

        let json = serde_json::to_string(&instance).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(instance, deserialized);
    }
}
