//! Play legality and resource payment.
//!
//! `check_play` is a pure function: it inspects the state and returns a
//! `PlayPlan` describing exactly what would happen, or the reason the play
//! is illegal. Nothing is mutated until the engine commits the plan, so a
//! rejected play leaves the state untouched.
//!
//! ## Cost gates
//!
//! - Level gate: resource-area size (rested or not) must reach the card's
//!   level. Commands skip this gate.
//! - Cost gate: un-rested resources must cover the cost. Single-use
//!   tokens are spent first and leave the game; ordinary resources rest.

use crate::cards::CardCategory;
use crate::core::{GameState, InstanceId, Phase, PlayOptions, PlayerId};
use crate::effects::ScriptRegistry;
use crate::error::{EngineError, Result};
use crate::stack::WindowKind;
use crate::zones::{Zone, ZonePosition};

/// A validated play, ready to commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayPlan {
    pub player: PlayerId,
    pub card: InstanceId,
    pub category: CardCategory,

    /// Resources spent, in the order they are paid.
    pub payment: Vec<InstanceId>,

    /// Unit a pilot pairs with.
    pub attach_to: Option<InstanceId>,

    /// Unit a command or script targets.
    pub target: Option<InstanceId>,
}

/// Validate playing `card` from `player`'s hand.
pub fn check_play(
    state: &GameState,
    scripts: &ScriptRegistry,
    player: PlayerId,
    card: InstanceId,
    options: PlayOptions,
) -> Result<PlayPlan> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    if !state.zones(player).contains(Zone::Hand, card) {
        return Err(EngineError::NotInHand(card));
    }
    let instance = state.get(card)?;
    let definition = &instance.definition;
    let category = definition.category;

    let mut attach_to = None;
    let mut target = None;

    match category {
        CardCategory::Resource => {
            return Err(EngineError::NotPlayable(definition.name.clone()));
        }
        CardCategory::Command => {
            check_command_timing(state, player)?;
            if scripts.requires_target(definition) {
                target = Some(check_target(state, &definition.name, options.target_unit_id)?);
            }
        }
        CardCategory::Unit | CardCategory::Pilot | CardCategory::Base => {
            check_deploy_timing(state, player)?;

            let available = state.zones(player).len(Zone::ResourceArea) as u32;
            if available < definition.level {
                return Err(EngineError::LevelTooLow {
                    required: definition.level,
                    available,
                });
            }

            match category {
                CardCategory::Unit => {
                    if state.units(player).len() >= state.config.max_battle_units {
                        return Err(EngineError::BattleAreaFull);
                    }
                }
                CardCategory::Pilot => {
                    attach_to = Some(check_pilot_host(state, player, &definition.name, options.attach_to_unit_id)?);
                }
                _ => {}
            }

            if scripts.get(&definition.id).is_some_and(|s| s.requires_target()) {
                target = Some(check_target(state, &definition.name, options.target_unit_id)?);
            }
        }
    }

    let payment = plan_payment(state, player, definition.cost)?;

    Ok(PlayPlan {
        player,
        card,
        category,
        payment,
        attach_to,
        target,
    })
}

/// Units, pilots and bases: active player, main window, holding priority.
fn check_deploy_timing(state: &GameState, player: PlayerId) -> Result<()> {
    if player != state.active_player {
        return Err(EngineError::NotActivePlayer(player));
    }
    match &state.priority {
        Some(window) if window.window == WindowKind::Main && state.phase == Phase::Main => {
            if window.current_player == player {
                Ok(())
            } else {
                Err(EngineError::NoPriority(player))
            }
        }
        _ => Err(EngineError::WrongPhase {
            action: "deploy",
            phase: state.phase,
        }),
    }
}

/// Commands: any open window whose timing matches the phase and step.
fn check_command_timing(state: &GameState, player: PlayerId) -> Result<()> {
    let Some(window) = &state.priority else {
        return Err(EngineError::WrongPhase {
            action: "play a command",
            phase: state.phase,
        });
    };
    let timing_matches = match window.window {
        WindowKind::Main => state.phase == Phase::Main,
        WindowKind::Battle => state
            .battle
            .as_ref()
            .is_some_and(|b| b.step == super::CombatStep::Action),
        WindowKind::End => state.phase == Phase::End,
    };
    if !timing_matches {
        return Err(EngineError::WrongPhase {
            action: "play a command",
            phase: state.phase,
        });
    }
    if window.current_player != player {
        return Err(EngineError::NoPriority(player));
    }
    Ok(())
}

/// A target must be a unit in either battle area.
fn check_target(state: &GameState, card_name: &str, target: Option<InstanceId>) -> Result<InstanceId> {
    let target = target.ok_or_else(|| EngineError::MissingTarget(card_name.to_string()))?;
    let in_play = PlayerId::all().any(|p| state.is_unit_in_play(p, target));
    if !in_play {
        return Err(EngineError::InvalidTarget(format!(
            "{} is not a unit in a battle area",
            state.card_name(target)
        )));
    }
    Ok(target)
}

/// A pilot needs one of its controller's units with no pilot yet.
fn check_pilot_host(
    state: &GameState,
    player: PlayerId,
    pilot_name: &str,
    host: Option<InstanceId>,
) -> Result<InstanceId> {
    let host = host.ok_or_else(|| EngineError::MissingTarget(pilot_name.to_string()))?;
    if !state.is_unit_in_play(player, host) {
        return Err(EngineError::InvalidTarget(format!(
            "{} is not one of your units in play",
            state.card_name(host)
        )));
    }
    if state.instance(host).is_some_and(|u| u.attached_pilot.is_some()) {
        return Err(EngineError::InvalidTarget(format!(
            "{} already has a pilot",
            state.card_name(host)
        )));
    }
    Ok(host)
}

/// Pick which active resources pay `cost`: single-use tokens first.
pub fn plan_payment(state: &GameState, player: PlayerId, cost: u32) -> Result<Vec<InstanceId>> {
    let active = state.active_resources(player);
    let available = active.len() as u32;
    if available < cost {
        return Err(EngineError::CannotPay {
            required: cost,
            available,
        });
    }

    let (mut tokens, ordinary): (Vec<_>, Vec<_>) = active
        .into_iter()
        .partition(|&id| state.instance(id).is_some_and(|c| c.is_single_use_resource()));
    tokens.extend(ordinary);
    tokens.truncate(cost as usize);
    Ok(tokens)
}

/// Spend the planned resources.
pub fn pay(state: &mut GameState, payment: &[InstanceId]) -> Result<()> {
    for &id in payment {
        let single_use = state.get(id)?.is_single_use_resource();
        if single_use {
            state.move_instance(id, Zone::Removed, ZonePosition::Top)?;
        } else if let Some(card) = state.instance_mut(id) {
            card.rested = true;
        }
    }
    Ok(())
}
