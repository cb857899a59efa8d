//! Effect resolution - applying effects to game state.
//!
//! Each `Effect` variant maps to one state change. Effects whose target
//! has left play since the item was queued do nothing except log. The
//! caller is responsible for running state-based actions after each
//! effect.

use std::sync::Arc;

use crate::cards::{CardDefinition, CardInstance, TokenKind};
use crate::core::{GameState, LogCategory};
use crate::error::Result;
use crate::zones::Zone;

use super::Effect;

/// Card id used for resource tokens created by effects.
pub const TEMPORARY_RESOURCE_ID: &str = "TOKEN-TEMP-RESOURCE";

/// Apply one effect.
pub fn resolve_effect(state: &mut GameState, effect: &Effect) -> Result<()> {
    match effect {
        Effect::Draw { player, count } => {
            let name = state.players[*player].name.clone();
            state.log(LogCategory::Effect, format!("{name} draws {count}"));
            state.draw(*player, *count)?;
        }

        Effect::DamageUnit { target, amount } => {
            let Some((owner, Zone::BattleArea)) = state.locate(*target) else {
                fizzle(state, effect);
                return Ok(());
            };
            if !state.is_unit_in_play(owner, *target) {
                fizzle(state, effect);
                return Ok(());
            }
            if let Some(card) = state.instance_mut(*target) {
                card.damage = card.damage.saturating_add(*amount);
            }
            let name = state.card_name(*target);
            state.log(LogCategory::Effect, format!("{name} takes {amount} damage"));
        }

        Effect::DamageBase { player, amount } => match state.zones(*player).base {
            Some(base) => {
                if let Some(card) = state.instance_mut(base) {
                    card.damage = card.damage.saturating_add(*amount);
                }
                let name = state.card_name(base);
                state.log(LogCategory::Effect, format!("{name} takes {amount} damage"));
            }
            None => fizzle(state, effect),
        },

        Effect::DestroyUnit { target } => {
            let in_play = state
                .locate(*target)
                .is_some_and(|(owner, _)| state.is_unit_in_play(owner, *target));
            if !in_play {
                fizzle(state, effect);
                return Ok(());
            }
            let name = state.card_name(*target);
            state.discard_from_play(*target)?;
            state.log(LogCategory::Effect, format!("{name} is destroyed"));
        }

        Effect::CreateResource { player } => {
            if state.zones(*player).len(Zone::ResourceArea) >= state.config.max_resources {
                fizzle(state, effect);
                return Ok(());
            }
            let definition = Arc::new(CardDefinition::resource(TEMPORARY_RESOURCE_ID, "Temporary Resource"));
            let id = state.alloc_instance();
            let token = CardInstance::token(id, *player, definition, TokenKind::TemporaryResource);
            state.insert_instance(token, Zone::ResourceArea)?;
            let name = state.players[*player].name.clone();
            state.log(LogCategory::Effect, format!("{name} gains a temporary resource"));
        }

        Effect::Log { message } => {
            state.log(LogCategory::Effect, message.clone());
        }
    }
    Ok(())
}

fn fizzle(state: &mut GameState, effect: &Effect) {
    state.log(LogCategory::Effect, format!("{effect}: no legal target, nothing happens"));
}
