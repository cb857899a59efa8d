//! Legal action enumeration.
//!
//! Candidates are generated broadly and then filtered through the same
//! checks the engine runs, so anything listed here is accepted by the
//! engine and anything rejected by the engine is never listed.

use crate::cards::CardCategory;
use crate::core::{AttackTarget, GameAction, GameState, InstanceId, PlayOptions, PlayerId};
use crate::effects::ScriptRegistry;
use crate::rules::{check_attack, check_block, check_play, CombatStep};

/// Every action `player` may legally take.
#[must_use]
pub fn legal_actions(state: &GameState, scripts: &ScriptRegistry, player: PlayerId) -> Vec<GameAction> {
    if state.game_over {
        return Vec::new();
    }

    if state.pending_discards > 0 {
        if player != state.active_player {
            return Vec::new();
        }
        return state
            .zones(player)
            .hand
            .iter()
            .map(|&card| GameAction::DiscardForHandLimit { card })
            .collect();
    }

    if let Some(battle) = state.battle.as_ref().filter(|b| b.step == CombatStep::Block) {
        if player != battle.defending_player {
            return Vec::new();
        }
        let mut actions = vec![GameAction::DeclareBlock { blocker: None }];
        actions.extend(
            state
                .units(player)
                .into_iter()
                .filter(|&unit| check_block(state, player, Some(unit)).is_ok())
                .map(|unit| GameAction::DeclareBlock { blocker: Some(unit) }),
        );
        return actions;
    }

    let Some(holder) = state.priority_holder() else {
        if state.phase.is_advanceable() && player == state.active_player {
            return vec![GameAction::AdvancePhase];
        }
        return Vec::new();
    };
    if holder != player {
        return Vec::new();
    }

    let mut actions = Vec::new();
    for &card in &state.zones(player).hand {
        for options in play_options(state, scripts, player, card) {
            if check_play(state, scripts, player, card, options).is_ok() {
                actions.push(GameAction::PlayCard { card, options });
            }
        }
    }

    for attacker in state.units(player) {
        for target in attack_targets(state, player) {
            if check_attack(state, player, attacker, target).is_ok() {
                actions.push(GameAction::DeclareAttack { attacker, target });
            }
        }
    }

    actions.push(GameAction::PassPriority);
    actions
}

/// Option combinations worth checking for one hand card.
fn play_options(state: &GameState, scripts: &ScriptRegistry, player: PlayerId, card: InstanceId) -> Vec<PlayOptions> {
    let Some(instance) = state.instance(card) else {
        return Vec::new();
    };
    let definition = &instance.definition;

    let hosts: Vec<Option<InstanceId>> = if definition.category == CardCategory::Pilot {
        state.units(player).into_iter().map(Some).collect()
    } else {
        vec![None]
    };

    let needs_target = match definition.category {
        CardCategory::Command => scripts.requires_target(definition),
        _ => scripts.get(&definition.id).is_some_and(|s| s.requires_target()),
    };
    let targets: Vec<Option<InstanceId>> = if needs_target {
        PlayerId::all()
            .flat_map(|p| state.units(p))
            .map(Some)
            .collect()
    } else {
        vec![None]
    };

    let mut options = Vec::with_capacity(hosts.len() * targets.len());
    for &attach_to_unit_id in &hosts {
        for &target_unit_id in &targets {
            options.push(PlayOptions {
                attach_to_unit_id,
                target_unit_id,
            });
        }
    }
    options
}

fn attack_targets(state: &GameState, player: PlayerId) -> Vec<AttackTarget> {
    let opponent = player.opponent();
    let mut targets = vec![AttackTarget::Player];
    targets.extend(
        state
            .zones(opponent)
            .battle_area
            .iter()
            .copied()
            .filter(|&id| state.is_unit_in_play(opponent, id))
            .map(AttackTarget::Unit),
    );
    targets
}
