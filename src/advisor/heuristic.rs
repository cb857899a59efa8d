//! Heuristic action scoring.
//!
//! Each legal action gets a score from simple board arithmetic; the
//! highest score wins, ties going to the earliest enumerated action. This
//! is a one-ply evaluator with no look-ahead.
//!
//! ## Rough scale
//!
//! - 1000: wins the game now
//! - 100: forced or mandatory progress (advance, discard)
//! - 40-90: developing the board or a favourable trade
//! - 0: passing
//! - negative: actively harmful (targeting your own unit)

use serde::{Deserialize, Serialize};

use super::enumerate::legal_actions;
use crate::cards::CardCategory;
use crate::core::{AttackTarget, GameAction, GameState, InstanceId, PlayerId};
use crate::effects::{infer_effects, InferredEffect, ScriptRegistry};
use crate::zones::Zone;

/// A suggested action with its score and a short justification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: GameAction,
    pub score: i32,
    pub rationale: String,
}

/// Pick the best legal action for `player`.
#[must_use]
pub fn recommend(state: &GameState, scripts: &ScriptRegistry, player: PlayerId) -> Option<Recommendation> {
    let mut best: Option<Recommendation> = None;
    for action in legal_actions(state, scripts, player) {
        let (score, rationale) = score_action(state, scripts, player, &action);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Recommendation {
                action,
                score,
                rationale,
            });
        }
    }
    best
}

/// Score one action.
#[must_use]
pub fn score_action(
    state: &GameState,
    scripts: &ScriptRegistry,
    player: PlayerId,
    action: &GameAction,
) -> (i32, String) {
    match *action {
        GameAction::AdvancePhase => (100, format!("advance out of the {} phase", state.phase)),
        GameAction::PassPriority => (0, "nothing better to do".to_string()),
        GameAction::DiscardForHandLimit { card } => {
            let cost = state.instance(card).map_or(0, |c| c.definition.cost as i32);
            (100 - cost, format!("discard {} to meet the hand limit", state.card_name(card)))
        }
        GameAction::DeclareBlock { blocker } => score_block(state, blocker),
        GameAction::DeclareAttack { attacker, target } => score_attack(state, player, attacker, target),
        GameAction::PlayCard { card, options } => {
            score_play(state, scripts, player, card, options.attach_to_unit_id, options.target_unit_id)
        }
    }
}

fn score_play(
    state: &GameState,
    scripts: &ScriptRegistry,
    player: PlayerId,
    card: InstanceId,
    host: Option<InstanceId>,
    target: Option<InstanceId>,
) -> (i32, String) {
    let Some(instance) = state.instance(card) else {
        return (i32::MIN, "unknown card".to_string());
    };
    let definition = &instance.definition;
    let name = &definition.name;

    if let Some(t) = target {
        if state.instance(t).is_some_and(|u| u.owner == player) {
            return (-50, format!("{name} would hit your own unit"));
        }
    }

    match definition.category {
        CardCategory::Unit => (
            60i32.saturating_add(definition.attack).saturating_add(definition.health),
            format!("deploy {name} to develop the board"),
        ),
        CardCategory::Pilot => {
            let linked = host
                .and_then(|h| state.instance(h))
                .is_some_and(|u| u.definition.links_with(definition));
            let bonus = definition.pilot_attack_bonus().saturating_add(definition.pilot_health_bonus());
            if linked {
                (75i32.saturating_add(bonus), format!("pair {name} for a link"))
            } else {
                (50i32.saturating_add(bonus), format!("pair {name} to boost a unit"))
            }
        }
        CardCategory::Base => {
            if state.zones(player).base.is_some() {
                (20, format!("replace the base with {name}"))
            } else {
                (65, format!("deploy {name} to protect the shields"))
            }
        }
        CardCategory::Command => {
            if scripts.contains(&definition.id) {
                return (45, format!("use {name}"));
            }
            let inferred = infer_effects(&definition.text);
            let mut score: i32 = 30;
            for effect in &inferred {
                match *effect {
                    InferredEffect::Draw(n) => {
                        let cards = i32::try_from(n).unwrap_or(i32::MAX);
                        score = score.saturating_add(cards.saturating_mul(10));
                    }
                    InferredEffect::DamageTargetUnit(amount) => {
                        let kills = target.is_some_and(|t| {
                            state.instance(t).is_some_and(|u| u.damage.saturating_add(amount) >= state.effective_health(t))
                        });
                        score = score.saturating_add(if kills { 40 } else { 10 });
                    }
                }
            }
            if inferred.is_empty() {
                score = 5;
            }
            (score, format!("cast {name}"))
        }
        CardCategory::Resource => (i32::MIN, format!("{name} cannot be played")),
    }
}

fn score_attack(state: &GameState, player: PlayerId, attacker: InstanceId, target: AttackTarget) -> (i32, String) {
    let opponent = player.opponent();
    let attack = state.effective_attack(attacker);
    let name = state.card_name(attacker);

    match target {
        AttackTarget::Player => {
            let zones = state.zones(opponent);
            if zones.base.is_none() && zones.len(Zone::Shields) == 0 {
                return (1000, format!("{name} attacks for the win"));
            }
            let blockers = state
                .units(opponent)
                .into_iter()
                .filter(|&u| state.instance(u).is_some_and(|c| !c.rested))
                .count() as i32;
            let score = 45i32.saturating_add(attack).saturating_sub(blockers.saturating_mul(5));
            (score, format!("{name} pressures the opponent"))
        }
        AttackTarget::Unit(defender) => {
            let hp_left = |id: InstanceId| {
                state.effective_health(id).saturating_sub(state.instance(id).map_or(0, |c| c.damage))
            };
            let kills = attack >= hp_left(defender);
            let survives = state.effective_attack(defender) < hp_left(attacker);
            match (kills, survives) {
                (true, true) => (80, format!("{name} destroys {} safely", state.card_name(defender))),
                (true, false) => (40, format!("{name} trades with {}", state.card_name(defender))),
                (false, true) => (10, format!("{name} chips {}", state.card_name(defender))),
                (false, false) => (-20, format!("{name} would die for nothing")),
            }
        }
    }
}

fn score_block(state: &GameState, blocker: Option<InstanceId>) -> (i32, String) {
    let Some(battle) = state.battle.as_ref() else {
        return (0, "no battle".to_string());
    };
    let defender = battle.defending_player;
    let zones = state.zones(defender);
    let lethal = battle.target == AttackTarget::Player && zones.base.is_none() && zones.len(Zone::Shields) == 0;

    let Some(blocker) = blocker else {
        return if lethal {
            (-1000, "not blocking loses the game".to_string())
        } else {
            (30, "take the hit and keep units ready".to_string())
        };
    };

    let name = state.card_name(blocker);
    if lethal {
        return (900, format!("{name} blocks to survive"));
    }
    let attack = state.effective_attack(battle.attacker);
    let hp_left = state
        .effective_health(blocker)
        .saturating_sub(state.instance(blocker).map_or(0, |c| c.damage));
    let attacker_hp_left = state
        .effective_health(battle.attacker)
        .saturating_sub(state.instance(battle.attacker).map_or(0, |c| c.damage));
    let survives = attack < hp_left;
    let kills = state.effective_attack(blocker) >= attacker_hp_left;
    match (kills, survives) {
        (true, true) => (85, format!("{name} blocks and destroys the attacker")),
        (false, true) => (50, format!("{name} blocks safely")),
        (true, false) => (35, format!("{name} trades with the attacker")),
        (false, false) => (5, format!("{name} would die blocking")),
    }
}
