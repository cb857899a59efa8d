//! Phase state machine.
//!
//! ```text
//! start -> draw -> resource -> main <-> battle
//!                                |
//!                               end -> (hand limit) -> next turn's start
//! ```
//!
//! Start, draw and resource advance on request. Main and end are left
//! only by closing their priority window; battle returns to main after
//! damage.

use super::Engine;
use crate::core::{GameAction, InstanceId, LogCategory, Phase, PlayerId};
use crate::error::{EngineError, Result};
use crate::stack::{PriorityState, WindowKind};
use crate::zones::{Zone, ZonePosition};

impl Engine {
    /// Move from start to draw, draw to resource, or resource to main.
    pub fn advance_to_next_phase(&mut self) -> Result<()> {
        self.ensure_running()?;
        let Some(next) = self.state.phase.next_on_advance() else {
            return Err(EngineError::WrongPhase {
                action: "advance",
                phase: self.state.phase,
            });
        };
        let active = self.state.active_player;
        self.state.record_action(active, GameAction::AdvancePhase);
        self.enter_phase(next)?;
        self.sweep()
    }

    /// Discard one card while the end-of-turn hand limit is exceeded.
    pub fn discard_for_hand_limit(&mut self, player: PlayerId, card: InstanceId) -> Result<()> {
        self.ensure_running()?;
        if self.state.pending_discards == 0 {
            return Err(EngineError::NoPendingDiscard);
        }
        if player != self.state.active_player {
            return Err(EngineError::NotActivePlayer(player));
        }
        if !self.state.zones(player).contains(Zone::Hand, card) {
            return Err(EngineError::NotInHand(card));
        }

        self.state.move_instance(card, Zone::Discard, ZonePosition::Top)?;
        self.state.pending_discards -= 1;
        self.state.record_action(player, GameAction::DiscardForHandLimit { card });
        let name = self.state.card_name(card);
        self.state.log(LogCategory::Phase, format!("{name} discarded for hand limit"));

        if self.state.pending_discards == 0 {
            self.start_next_turn()?;
        }
        Ok(())
    }

    /// Enter `phase` and run its entry action.
    pub(super) fn enter_phase(&mut self, phase: Phase) -> Result<()> {
        let active = self.state.active_player;
        self.state.phase = phase;
        let name = self.state.players[active].name.clone();
        self.state.log(
            LogCategory::Phase,
            format!("Turn {}: {name}'s {phase} phase", self.state.turn),
        );

        match phase {
            Phase::Start => self.ready_all(active),
            Phase::Draw => {
                self.state.draw(active, 1)?;
            }
            Phase::Resource => self.place_resource(active)?,
            Phase::Main => {
                self.state.priority = Some(PriorityState::open(WindowKind::Main, active));
            }
            Phase::End => {
                self.state.priority = Some(PriorityState::open(WindowKind::End, active.opponent()));
            }
            Phase::Battle => {}
        }
        Ok(())
    }

    fn ready_all(&mut self, player: PlayerId) {
        let zones = self.state.zones(player);
        let ids: Vec<_> = zones
            .resource_area
            .iter()
            .chain(zones.battle_area.iter())
            .copied()
            .chain(zones.base)
            .collect();
        for id in ids {
            if let Some(card) = self.state.instance_mut(id) {
                card.rested = false;
            }
        }
    }

    fn place_resource(&mut self, player: PlayerId) -> Result<()> {
        let zones = self.state.zones(player);
        if zones.len(Zone::ResourceArea) >= self.state.config.max_resources {
            self.state.log(LogCategory::Phase, "resource area is full");
            return Ok(());
        }
        let Some(top) = zones.top(Zone::ResourceDeck) else {
            self.state.log(LogCategory::Phase, "resource deck is empty");
            return Ok(());
        };
        self.state.move_instance(top, Zone::ResourceArea, ZonePosition::Top)?;
        let count = self.state.zones(player).len(Zone::ResourceArea);
        self.state.log(LogCategory::Phase, format!("resource placed ({count} in play)"));
        Ok(())
    }

    /// The end window closed: enforce the hand limit, then pass the turn.
    pub(super) fn finish_end_phase(&mut self) -> Result<()> {
        self.state.priority = None;
        let active = self.state.active_player;
        let hand = self.state.zones(active).len(Zone::Hand);
        let limit = self.state.config.max_hand_size;
        if hand > limit {
            let excess = (hand - limit) as u32;
            self.state.pending_discards = excess;
            let name = self.state.players[active].name.clone();
            self.state.log(
                LogCategory::Phase,
                format!("{name} must discard {excess} card(s) down to {limit}"),
            );
            return Ok(());
        }
        self.start_next_turn()
    }

    fn start_next_turn(&mut self) -> Result<()> {
        self.state.active_player = self.state.active_player.opponent();
        self.state.turn += 1;
        self.enter_phase(Phase::Start)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cards::{CardDefinition, Color};
    use crate::core::{Phase, PlayerId};
    use crate::engine::{EngineBuilder, PlayerSetup};
    use crate::error::EngineError;
    use crate::zones::Zone;

    fn engine() -> crate::engine::Engine {
        let unit = Arc::new(CardDefinition::unit("U-1", "GM", Color::White, 1, 1, 1, 1));
        let resource = Arc::new(CardDefinition::resource("R-1", "Resource"));
        let setup = |name: &str| PlayerSetup::new(name, vec![unit.clone(); 50], vec![resource.clone(); 10]);
        EngineBuilder::new(setup("A"), setup("B"))
            .validate_decks(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_advance_chain() {
        let mut engine = engine();
        engine.advance_to_next_phase().unwrap();
        assert_eq!(engine.state().phase, Phase::Draw);
        assert_eq!(engine.state().zones(PlayerId::ONE).len(Zone::Hand), 6);

        engine.advance_to_next_phase().unwrap();
        assert_eq!(engine.state().phase, Phase::Resource);
        assert_eq!(engine.state().zones(PlayerId::ONE).len(Zone::ResourceArea), 1);

        engine.advance_to_next_phase().unwrap();
        assert_eq!(engine.state().phase, Phase::Main);
        assert_eq!(engine.state().priority_holder(), Some(PlayerId::ONE));

        assert!(matches!(
            engine.advance_to_next_phase(),
            Err(EngineError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_discard_without_pending() {
        let mut engine = engine();
        let card = engine.state().zones(PlayerId::ONE).ids(Zone::Hand)[0];
        assert_eq!(
            engine.discard_for_hand_limit(PlayerId::ONE, card),
            Err(EngineError::NoPendingDiscard)
        );
    }
}
