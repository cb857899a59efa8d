//! State-based actions.
//!
//! Lethally damaged bases and units are collected for both players first
//! and only then discarded, so the outcome does not depend on which
//! player is swept first. A second sweep right after finds nothing.

use crate::core::{GameState, InstanceId, LogCategory, PlayerId};
use crate::error::Result;

/// Cards that would be destroyed by a sweep right now.
#[must_use]
pub fn lethal_cards(state: &GameState) -> Vec<InstanceId> {
    let mut doomed = Vec::new();
    for player in PlayerId::all() {
        if let Some(base) = state.zones(player).base {
            if is_lethal(state, base) {
                doomed.push(base);
            }
        }
        doomed.extend(
            state
                .units(player)
                .into_iter()
                .filter(|&unit| is_lethal(state, unit)),
        );
    }
    doomed
}

fn is_lethal(state: &GameState, id: InstanceId) -> bool {
    state
        .instance(id)
        .is_some_and(|card| card.damage >= state.effective_health(id))
}

/// Discard every lethally damaged base and unit, with their pilots.
///
/// Returns the number of cards discarded.
pub fn check_state_based_actions(state: &mut GameState) -> Result<usize> {
    let doomed = lethal_cards(state);
    let mut discarded = 0;
    for id in doomed {
        let name = state.card_name(id);
        let gone = state.discard_from_play(id)?;
        discarded += gone.len();
        state.log(LogCategory::StateBased, format!("{name} is destroyed"));
        for pilot in gone.into_iter().skip(1) {
            let pilot_name = state.card_name(pilot);
            state.log(LogCategory::StateBased, format!("{pilot_name} is discarded with its unit"));
        }
    }
    Ok(discarded)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, Color};
    use crate::core::EngineConfig;
    use crate::zones::Zone;

    fn state() -> GameState {
        GameState::new(EngineConfig::default(), ["A", "B"], PlayerId::ONE)
    }

    fn unit(s: &mut GameState, owner: PlayerId, health: i32) -> InstanceId {
        let def = Arc::new(CardDefinition::unit("U", "GM", Color::White, 1, 1, 1, health));
        s.create_instance(owner, def, Zone::BattleArea).unwrap()
    }

    #[test]
    fn test_both_players_swept_together() {
        let mut s = state();
        let a = unit(&mut s, PlayerId::ONE, 2);
        let b = unit(&mut s, PlayerId::TWO, 2);
        let survivor = unit(&mut s, PlayerId::TWO, 3);
        s.instance_mut(a).unwrap().damage = 2;
        s.instance_mut(b).unwrap().damage = 5;
        s.instance_mut(survivor).unwrap().damage = 2;

        assert_eq!(check_state_based_actions(&mut s).unwrap(), 2);
        assert_eq!(s.locate(a), Some((PlayerId::ONE, Zone::Discard)));
        assert_eq!(s.locate(b), Some((PlayerId::TWO, Zone::Discard)));
        assert_eq!(s.locate(survivor), Some((PlayerId::TWO, Zone::BattleArea)));
    }

    #[test]
    fn test_idempotent() {
        let mut s = state();
        let a = unit(&mut s, PlayerId::ONE, 1);
        s.instance_mut(a).unwrap().damage = 1;

        assert_eq!(check_state_based_actions(&mut s).unwrap(), 1);
        assert_eq!(check_state_based_actions(&mut s).unwrap(), 0);
    }

    #[test]
    fn test_pilot_health_keeps_unit_alive() {
        let mut s = state();
        let u = unit(&mut s, PlayerId::ONE, 2);
        let def = Arc::new(CardDefinition::pilot("P", "Amuro", Color::Blue, 1, 1, 1, 2));
        let p = s.create_instance(PlayerId::ONE, def, Zone::BattleArea).unwrap();
        s.attach_pilot(p, u).unwrap();
        s.instance_mut(u).unwrap().damage = 3;

        assert_eq!(check_state_based_actions(&mut s).unwrap(), 0);

        s.instance_mut(u).unwrap().damage = 4;
        assert_eq!(check_state_based_actions(&mut s).unwrap(), 2);
        assert_eq!(s.locate(p), Some((PlayerId::ONE, Zone::Discard)));
    }

    #[test]
    fn test_base_destroyed() {
        let mut s = state();
        let def = Arc::new(CardDefinition::base("B", "Base", Color::Colorless, 0, 0, 0, 3));
        let base = s.create_instance(PlayerId::TWO, def, Zone::Base).unwrap();
        s.instance_mut(base).unwrap().damage = 3;

        check_state_based_actions(&mut s).unwrap();
        assert_eq!(s.zones(PlayerId::TWO).base, None);
        assert_eq!(s.locate(base), Some((PlayerId::TWO, Zone::Discard)));
    }
}
