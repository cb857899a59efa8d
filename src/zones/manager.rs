//! Per-player zone lists.
//!
//! `PlayerZones` stores instance ids only; the instances themselves live in
//! the `GameState` arena. A given id is in exactly one list (or is the
//! single `base` reference) at any time. Outside this module, lists are
//! changed only through `GameState::move_instance`, which always removes
//! before it inserts.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;

/// Named zones a player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    ResourceDeck,
    Hand,
    ResourceArea,
    BattleArea,
    Shields,
    Base,
    Discard,
    Removed,
}

impl Zone {
    /// Every zone, in a stable order.
    pub const ALL: [Zone; 9] = [
        Zone::Deck,
        Zone::ResourceDeck,
        Zone::Hand,
        Zone::ResourceArea,
        Zone::BattleArea,
        Zone::Shields,
        Zone::Base,
        Zone::Discard,
        Zone::Removed,
    ];

    /// Cards in this zone are face-down.
    #[must_use]
    pub fn is_hidden(self) -> bool {
        matches!(self, Zone::Deck | Zone::ResourceDeck | Zone::Shields)
    }

    /// Cards in this zone are in play (can be damaged, rested, readied).
    #[must_use]
    pub fn is_in_play(self) -> bool {
        matches!(self, Zone::ResourceArea | Zone::BattleArea | Zone::Base)
    }
}

/// Position for inserting a card into an ordered zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the list).
    Top,
    /// Add to bottom of zone (start of the list).
    Bottom,
}

/// One player's zones.
///
/// Uses `im::Vector` so cloning a whole game state for a snapshot is O(1).
/// For ordered zones the last element is the top.
///
/// ```
/// use rust_tcg::zones::{PlayerZones, Zone};
/// use rust_tcg::core::InstanceId;
///
/// let zones = PlayerZones::default();
/// assert_eq!(zones.len(Zone::Hand), 0);
/// assert_eq!(zones.locate(InstanceId(1)), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: Vector<InstanceId>,
    pub resource_deck: Vector<InstanceId>,
    pub hand: Vector<InstanceId>,
    pub resource_area: Vector<InstanceId>,
    pub battle_area: Vector<InstanceId>,
    pub shields: Vector<InstanceId>,
    pub base: Option<InstanceId>,
    pub discard: Vector<InstanceId>,
    pub removed: Vector<InstanceId>,
}

impl PlayerZones {
    /// Borrow a list zone. `Zone::Base` is a single slot and returns `None`.
    #[must_use]
    pub fn list(&self, zone: Zone) -> Option<&Vector<InstanceId>> {
        match zone {
            Zone::Deck => Some(&self.deck),
            Zone::ResourceDeck => Some(&self.resource_deck),
            Zone::Hand => Some(&self.hand),
            Zone::ResourceArea => Some(&self.resource_area),
            Zone::BattleArea => Some(&self.battle_area),
            Zone::Shields => Some(&self.shields),
            Zone::Discard => Some(&self.discard),
            Zone::Removed => Some(&self.removed),
            Zone::Base => None,
        }
    }

    fn list_mut(&mut self, zone: Zone) -> Option<&mut Vector<InstanceId>> {
        match zone {
            Zone::Deck => Some(&mut self.deck),
            Zone::ResourceDeck => Some(&mut self.resource_deck),
            Zone::Hand => Some(&mut self.hand),
            Zone::ResourceArea => Some(&mut self.resource_area),
            Zone::BattleArea => Some(&mut self.battle_area),
            Zone::Shields => Some(&mut self.shields),
            Zone::Discard => Some(&mut self.discard),
            Zone::Removed => Some(&mut self.removed),
            Zone::Base => None,
        }
    }

    /// Ids in a zone, bottom to top.
    #[must_use]
    pub fn ids(&self, zone: Zone) -> Vec<InstanceId> {
        match self.list(zone) {
            Some(list) => list.iter().copied().collect(),
            None => self.base.into_iter().collect(),
        }
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        match self.list(zone) {
            Some(list) => list.len(),
            None => usize::from(self.base.is_some()),
        }
    }

    /// Is `id` in `zone`?
    #[must_use]
    pub fn contains(&self, zone: Zone, id: InstanceId) -> bool {
        match self.list(zone) {
            Some(list) => list.iter().any(|&e| e == id),
            None => self.base == Some(id),
        }
    }

    /// Find which zone holds `id`.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<Zone> {
        Zone::ALL.into_iter().find(|&zone| self.contains(zone, id))
    }

    /// The top card of an ordered zone.
    #[must_use]
    pub fn top(&self, zone: Zone) -> Option<InstanceId> {
        self.list(zone)?.back().copied()
    }

    /// Remove `id` from wherever it is. Returns the zone it left.
    pub(crate) fn remove(&mut self, id: InstanceId) -> Option<Zone> {
        let zone = self.locate(id)?;
        match self.list_mut(zone) {
            Some(list) => {
                let pos = list.iter().position(|&e| e == id)?;
                list.remove(pos);
            }
            None => self.base = None,
        }
        Some(zone)
    }

    /// Insert `id` into `zone`.
    ///
    /// Returns `false` (and changes nothing) if `zone` is the base slot and
    /// it is already occupied.
    #[must_use]
    pub(crate) fn insert(&mut self, id: InstanceId, zone: Zone, position: ZonePosition) -> bool {
        let base_free = self.base.is_none();
        match self.list_mut(zone) {
            Some(list) => {
                match position {
                    ZonePosition::Top => list.push_back(id),
                    ZonePosition::Bottom => list.push_front(id),
                }
                true
            }
            None if base_free => {
                self.base = Some(id);
                true
            }
            None => false,
        }
    }

    /// Shuffle an ordered zone in place.
    pub(crate) fn shuffle(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(list) = self.list_mut(zone) {
            let mut ids: Vec<InstanceId> = list.iter().copied().collect();
            rng.shuffle(&mut ids);
            *list = ids.into_iter().collect();
        }
    }

    /// Total number of ids held across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        Zone::ALL.into_iter().map(|z| self.len(z)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_locate() {
        let mut zones = PlayerZones::default();
        assert!(zones.insert(InstanceId(1), Zone::Deck, ZonePosition::Top));
        assert!(zones.insert(InstanceId(2), Zone::Deck, ZonePosition::Top));
        assert!(zones.insert(InstanceId(3), Zone::Deck, ZonePosition::Bottom));

        assert_eq!(zones.ids(Zone::Deck), vec![InstanceId(3), InstanceId(1), InstanceId(2)]);
        assert_eq!(zones.top(Zone::Deck), Some(InstanceId(2)));
        assert_eq!(zones.locate(InstanceId(3)), Some(Zone::Deck));
    }

    #[test]
    fn test_remove_returns_origin() {
        let mut zones = PlayerZones::default();
        assert!(zones.insert(InstanceId(1), Zone::Hand, ZonePosition::Top));

        assert_eq!(zones.remove(InstanceId(1)), Some(Zone::Hand));
        assert_eq!(zones.remove(InstanceId(1)), None);
        assert_eq!(zones.total(), 0);
    }

    #[test]
    fn test_base_slot_is_single() {
        let mut zones = PlayerZones::default();
        assert!(zones.insert(InstanceId(1), Zone::Base, ZonePosition::Top));
        assert!(!zones.insert(InstanceId(2), Zone::Base, ZonePosition::Top));

        assert_eq!(zones.base, Some(InstanceId(1)));
        assert_eq!(zones.len(Zone::Base), 1);
        assert_eq!(zones.remove(InstanceId(1)), Some(Zone::Base));
        assert_eq!(zones.base, None);
    }

    #[test]
    fn test_identity_shuffle_keeps_order() {
        let mut zones = PlayerZones::default();
        for i in 1..=5 {
            assert!(zones.insert(InstanceId(i), Zone::Deck, ZonePosition::Top));
        }
        let before = zones.ids(Zone::Deck);
        zones.shuffle(Zone::Deck, &mut GameRng::identity());
        assert_eq!(zones.ids(Zone::Deck), before);

        zones.shuffle(Zone::Deck, &mut GameRng::new(3));
        let mut after = zones.ids(Zone::Deck);
        after.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn test_zone_flags() {
        assert!(Zone::Shields.is_hidden());
        assert!(!Zone::Hand.is_hidden());
        assert!(Zone::BattleArea.is_in_play());
        assert!(!Zone::Discard.is_in_play());
    }
}
