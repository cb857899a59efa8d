//! Attacks, blocks and combat damage.

use super::Engine;
use crate::core::{AttackTarget, GameAction, InstanceId, LogCategory, Phase, PlayerId};
use crate::error::Result;
use crate::rules::{check_attack, check_block, check_state_based_actions, BattleState, CombatStep};
use crate::stack::{PriorityState, WindowKind};
use crate::zones::{Zone, ZonePosition};

impl Engine {
    /// Attack with `attacker`.
    ///
    /// Rests the attacker, closes the main window and enters the block
    /// step, where the defender must declare a blocker or decline.
    pub fn declare_attack(&mut self, player: PlayerId, attacker: InstanceId, target: AttackTarget) -> Result<()> {
        check_attack(&self.state, player, attacker, target)?;

        if let Some(unit) = self.state.instance_mut(attacker) {
            unit.rested = true;
        }
        self.state.record_action(player, GameAction::DeclareAttack { attacker, target });
        self.state.priority = None;
        self.state.phase = Phase::Battle;
        self.state.battle = Some(BattleState::declare(attacker, player, target));

        let attacker_name = self.state.card_name(attacker);
        let target_name = match target {
            AttackTarget::Player => self.state.players[player.opponent()].name.clone(),
            AttackTarget::Unit(unit) => self.state.card_name(unit),
        };
        self.state
            .log(LogCategory::Combat, format!("{attacker_name} attacks {target_name}"));
        Ok(())
    }

    /// Declare a blocker, or `None` to let the attack through.
    ///
    /// Opens the battle action window with the defender holding priority.
    pub fn declare_block(&mut self, player: PlayerId, blocker: Option<InstanceId>) -> Result<()> {
        check_block(&self.state, player, blocker)?;

        if let Some(unit) = blocker {
            if let Some(card) = self.state.instance_mut(unit) {
                card.rested = true;
            }
            let name = self.state.card_name(unit);
            self.state.log(LogCategory::Combat, format!("{name} blocks"));
        } else {
            self.state.log(LogCategory::Combat, "no block");
        }

        if let Some(battle) = self.state.battle.as_mut() {
            battle.blocker = blocker;
            battle.step = CombatStep::Action;
        }
        self.state.record_action(player, GameAction::DeclareBlock { blocker });
        self.state.priority = Some(PriorityState::open(WindowKind::Battle, player));
        Ok(())
    }

    /// The battle window closed: deal damage and return to main.
    pub(super) fn resolve_combat_damage(&mut self) -> Result<()> {
        self.state.priority = None;
        let Some(battle) = self.state.battle.as_mut() else {
            return Ok(());
        };
        battle.step = CombatStep::Damage;
        let battle = battle.clone();

        if !self.state.is_unit_in_play(battle.attacking_player, battle.attacker) {
            self.state
                .log(LogCategory::Combat, "attacker left the battle area; no damage is dealt");
        } else if let Some(defender) = battle.defending_unit() {
            self.unit_combat(&battle, defender)?;
        } else {
            self.attack_player(&battle)?;
        }

        if !self.state.game_over {
            self.state.battle = None;
            self.state.phase = Phase::Main;
            let active = self.state.active_player;
            self.state.priority = Some(PriorityState::open(WindowKind::Main, active));
            self.state.log(LogCategory::Combat, "battle ends");
        }
        Ok(())
    }

    fn unit_combat(&mut self, battle: &BattleState, defender: InstanceId) -> Result<()> {
        if !self.state.is_unit_in_play(battle.defending_player, defender) {
            self.state
                .log(LogCategory::Combat, "defending unit left the battle area; no damage is dealt");
            return Ok(());
        }
        let attacker = battle.attacker;
        let attack = self.state.effective_attack(attacker);
        let counter = self.state.effective_attack(defender);
        if let Some(card) = self.state.instance_mut(defender) {
            card.damage = card.damage.saturating_add(attack);
        }
        if let Some(card) = self.state.instance_mut(attacker) {
            card.damage = card.damage.saturating_add(counter);
        }
        let attacker_name = self.state.card_name(attacker);
        let defender_name = self.state.card_name(defender);
        self.state.log(
            LogCategory::Combat,
            format!("{attacker_name} deals {attack} to {defender_name} and takes {counter}"),
        );
        check_state_based_actions(&mut self.state)?;
        Ok(())
    }

    fn attack_player(&mut self, battle: &BattleState) -> Result<()> {
        let defender = battle.defending_player;
        let attack = self.state.effective_attack(battle.attacker);

        if let Some(base) = self.state.zones(defender).base {
            if let Some(card) = self.state.instance_mut(base) {
                card.damage = card.damage.saturating_add(attack);
            }
            let name = self.state.card_name(base);
            self.state
                .log(LogCategory::Combat, format!("{name} absorbs {attack} damage"));
            check_state_based_actions(&mut self.state)?;
        } else if let Some(shield) = self.state.zones(defender).top(Zone::Shields) {
            self.state.move_instance(shield, Zone::Discard, ZonePosition::Top)?;
            let name = self.state.card_name(shield);
            let left = self.state.zones(defender).len(Zone::Shields);
            self.state.log(
                LogCategory::Combat,
                format!("shield {name} is destroyed ({left} left)"),
            );
        } else {
            self.state.declare_winner(battle.attacking_player, "a direct attack");
        }
        Ok(())
    }
}
