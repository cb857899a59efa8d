//! Combat state and declaration rules.
//!
//! A battle moves through three steps:
//!
//! 1. `Block` - the defender may declare one blocker or decline
//! 2. `Action` - a battle priority window, defender first
//! 3. `Damage` - damage is dealt and state-based actions run
//!
//! The checks here are pure; the engine applies the transitions.

use serde::{Deserialize, Serialize};

use crate::core::{AttackTarget, GameState, InstanceId, Phase, PlayerId};
use crate::error::{EngineError, Result};
use crate::stack::WindowKind;

/// Current step of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStep {
    Block,
    Action,
    Damage,
}

/// An attack in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub attacker: InstanceId,
    pub attacking_player: PlayerId,
    pub defending_player: PlayerId,
    pub target: AttackTarget,
    pub blocker: Option<InstanceId>,
    pub step: CombatStep,
}

impl BattleState {
    /// Start a battle in the block step.
    #[must_use]
    pub fn declare(attacker: InstanceId, attacking_player: PlayerId, target: AttackTarget) -> Self {
        Self {
            attacker,
            attacking_player,
            defending_player: attacking_player.opponent(),
            target,
            blocker: None,
            step: CombatStep::Block,
        }
    }

    /// The unit that actually fights the attacker, if any.
    ///
    /// A blocker always supersedes the declared target.
    #[must_use]
    pub fn defending_unit(&self) -> Option<InstanceId> {
        self.blocker.or(match self.target {
            AttackTarget::Unit(unit) => Some(unit),
            AttackTarget::Player => None,
        })
    }
}

/// Validate an attack declaration.
pub fn check_attack(
    state: &GameState,
    player: PlayerId,
    attacker: InstanceId,
    target: AttackTarget,
) -> Result<()> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    if player != state.active_player {
        return Err(EngineError::NotActivePlayer(player));
    }
    match &state.priority {
        Some(window) if window.window == WindowKind::Main && state.phase == Phase::Main => {
            if window.current_player != player {
                return Err(EngineError::NoPriority(player));
            }
        }
        _ => {
            return Err(EngineError::WrongPhase {
                action: "attack",
                phase: state.phase,
            })
        }
    }
    if !state.stack.is_empty() {
        return Err(EngineError::IllegalAttack(
            "effects are still waiting to resolve".to_string(),
        ));
    }

    if !state.is_unit_in_play(player, attacker) {
        return Err(EngineError::IllegalAttack(format!(
            "{} is not a unit in your battle area",
            state.card_name(attacker)
        )));
    }
    let unit = state.get(attacker)?;
    if unit.rested {
        return Err(EngineError::IllegalAttack(format!(
            "{} is rested",
            state.card_name(attacker)
        )));
    }
    if unit.entered_turn == Some(state.turn) && !unit.link_active {
        return Err(EngineError::IllegalAttack(format!(
            "{} entered play this turn",
            state.card_name(attacker)
        )));
    }

    if let AttackTarget::Unit(defender) = target {
        let opponent = player.opponent();
        if !state.is_unit_in_play(opponent, defender) {
            return Err(EngineError::IllegalAttack(format!(
                "{} is not an enemy unit in play",
                state.card_name(defender)
            )));
        }
        if !state.get(defender)?.rested {
            return Err(EngineError::IllegalAttack(format!(
                "{} is not rested",
                state.card_name(defender)
            )));
        }
    }
    Ok(())
}

/// Validate a block declaration (`None` declines to block).
pub fn check_block(state: &GameState, player: PlayerId, blocker: Option<InstanceId>) -> Result<()> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    let Some(battle) = state.battle.as_ref().filter(|b| b.step == CombatStep::Block) else {
        return Err(EngineError::WrongPhase {
            action: "block",
            phase: state.phase,
        });
    };
    if player != battle.defending_player {
        return Err(EngineError::IllegalBlock(format!(
            "{player} is not the defending player"
        )));
    }
    let Some(blocker) = blocker else {
        return Ok(());
    };
    if !state.is_unit_in_play(player, blocker) {
        return Err(EngineError::IllegalBlock(format!(
            "{} is not one of your units in play",
            state.card_name(blocker)
        )));
    }
    if state.get(blocker)?.rested {
        return Err(EngineError::IllegalBlock(format!(
            "{} is rested",
            state.card_name(blocker)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, Color};
    use crate::core::EngineConfig;
    use crate::stack::PriorityState;
    use crate::zones::Zone;

    fn main_phase() -> GameState {
        let mut s = GameState::new(EngineConfig::default(), ["A", "B"], PlayerId::ONE);
        s.turn = 3;
        s.phase = Phase::Main;
        s.priority = Some(PriorityState::open(WindowKind::Main, PlayerId::ONE));
        s
    }

    fn unit(s: &mut GameState, owner: PlayerId) -> InstanceId {
        let def = Arc::new(CardDefinition::unit("U", "Zaku", Color::Green, 1, 1, 2, 2));
        let id = s.create_instance(owner, def, Zone::BattleArea).unwrap();
        s.instance_mut(id).unwrap().entered_turn = Some(1);
        id
    }

    #[test]
    fn test_attack_player() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player).is_ok());
    }

    #[test]
    fn test_summoning_sickness_unless_linked() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        s.instance_mut(attacker).unwrap().entered_turn = Some(3);
        assert!(matches!(
            check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player),
            Err(EngineError::IllegalAttack(_))
        ));

        s.instance_mut(attacker).unwrap().link_active = true;
        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player).is_ok());
    }

    #[test]
    fn test_rested_attacker_cannot_attack() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        s.instance_mut(attacker).unwrap().rested = true;
        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player).is_err());
    }

    #[test]
    fn test_unit_target_must_be_rested_enemy() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        let enemy = unit(&mut s, PlayerId::TWO);

        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Unit(enemy)).is_err());
        s.instance_mut(enemy).unwrap().rested = true;
        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Unit(enemy)).is_ok());

        let friend = unit(&mut s, PlayerId::ONE);
        s.instance_mut(friend).unwrap().rested = true;
        assert!(check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Unit(friend)).is_err());
    }

    #[test]
    fn test_attack_needs_main_window() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        s.priority = Some(PriorityState::open(WindowKind::Main, PlayerId::TWO));
        assert_eq!(
            check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player),
            Err(EngineError::NoPriority(PlayerId::ONE))
        );

        s.priority = None;
        s.phase = Phase::End;
        assert!(matches!(
            check_attack(&s, PlayerId::ONE, attacker, AttackTarget::Player),
            Err(EngineError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_block_rules() {
        let mut s = main_phase();
        let attacker = unit(&mut s, PlayerId::ONE);
        let blocker = unit(&mut s, PlayerId::TWO);
        s.battle = Some(BattleState::declare(attacker, PlayerId::ONE, AttackTarget::Player));

        assert!(check_block(&s, PlayerId::TWO, None).is_ok());
        assert!(check_block(&s, PlayerId::TWO, Some(blocker)).is_ok());
        assert!(matches!(
            check_block(&s, PlayerId::ONE, Some(blocker)),
            Err(EngineError::IllegalBlock(_))
        ));

        s.instance_mut(blocker).unwrap().rested = true;
        assert!(check_block(&s, PlayerId::TWO, Some(blocker)).is_err());
    }

    #[test]
    fn test_blocker_supersedes_target() {
        let mut battle = BattleState::declare(InstanceId(1), PlayerId::ONE, AttackTarget::Unit(InstanceId(2)));
        assert_eq!(battle.defending_unit(), Some(InstanceId(2)));
        battle.blocker = Some(InstanceId(3));
        assert_eq!(battle.defending_unit(), Some(InstanceId(3)));
    }
}
