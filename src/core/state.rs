//! Game state: the aggregate root.
//!
//! ## GameState
//!
//! - Arena of card instances keyed by `InstanceId`
//! - Both players' zone lists (ids only)
//! - Turn, phase, priority window, battle, effect stack
//! - Append-only event log and action history
//!
//! Collections use `im` persistent data structures, so `clone()` is O(1)
//! and yields an independent value: later mutation of either copy is never
//! visible through the other. Snapshots handed to callers are such clones.

use std::sync::Arc;

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::EngineConfig;
use super::entity::InstanceId;
use super::log::{LogCategory, LogEntry};
use super::phase::Phase;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardCategory, CardDefinition, CardInstance};
use crate::error::{EngineError, Result};
use crate::rules::BattleState;
use crate::stack::{EffectStack, PriorityState};
use crate::zones::{PlayerZones, Zone, ZonePosition};

/// One player's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub zones: PlayerZones,
    pub defeated: bool,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zones: PlayerZones::default(),
            defeated: false,
        }
    }
}

/// Result of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// All requested cards were drawn.
    Drawn(u32),
    /// The deck ran out; the drawing player has lost.
    DeckOut,
}

/// Full game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,

    /// Every card instance in the game.
    pub instances: OrdMap<InstanceId, CardInstance>,

    pub players: PlayerMap<PlayerState>,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Player who took the first turn.
    pub starting_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn: u32,

    pub phase: Phase,

    /// Present only during an active combat.
    pub battle: Option<BattleState>,

    /// Present only while a priority window is open.
    pub priority: Option<PriorityState>,

    pub stack: EffectStack,

    /// Cards the active player must still discard for the hand limit.
    pub pending_discards: u32,

    pub game_over: bool,
    pub winner: Option<PlayerId>,

    pub log: Vector<LogEntry>,
    pub history: Vector<ActionRecord>,

    next_instance: InstanceId,
}

impl GameState {
    /// Create an empty state for two named players.
    #[must_use]
    pub fn new(config: EngineConfig, names: [&str; 2], starting_player: PlayerId) -> Self {
        Self {
            config,
            instances: OrdMap::new(),
            players: PlayerMap::from_pair(PlayerState::new(names[0]), PlayerState::new(names[1])),
            active_player: starting_player,
            starting_player,
            turn: 1,
            phase: Phase::Start,
            battle: None,
            priority: None,
            stack: EffectStack::new(),
            pending_discards: 0,
            game_over: false,
            winner: None,
            log: Vector::new(),
            history: Vector::new(),
            next_instance: InstanceId::FIRST,
        }
    }

    // === Instances ===

    /// Allocate a new instance id.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = self.next_instance;
        self.next_instance = id.next();
        id
    }

    /// Create an instance of `definition` owned by `owner` and put it in `zone`.
    pub fn create_instance(
        &mut self,
        owner: PlayerId,
        definition: Arc<CardDefinition>,
        zone: Zone,
    ) -> Result<InstanceId> {
        let id = self.alloc_instance();
        self.insert_instance(CardInstance::new(id, owner, definition), zone)?;
        Ok(id)
    }

    /// Register a fully built instance and place it in `zone`.
    ///
    /// The instance id must come from `alloc_instance`.
    pub fn insert_instance(&mut self, mut instance: CardInstance, zone: Zone) -> Result<()> {
        let id = instance.id;
        let owner = instance.owner;
        if !self.players[owner].zones.insert(id, zone, ZonePosition::Top) {
            return Err(EngineError::InvalidTarget(format!(
                "{owner} already has a base"
            )));
        }
        instance.face_down = zone.is_hidden();
        if zone.is_in_play() {
            instance.entered_turn = Some(self.turn);
        }
        self.instances.insert(id, instance);
        Ok(())
    }

    /// Get a card instance.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    /// Get a card instance or fail with `UnknownInstance`.
    pub fn get(&self, id: InstanceId) -> Result<&CardInstance> {
        self.instances.get(&id).ok_or(EngineError::UnknownInstance(id))
    }

    /// Get a mutable card instance.
    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.instances.get_mut(&id)
    }

    /// Where an instance is right now.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(PlayerId, Zone)> {
        let owner = self.instance(id)?.owner;
        let zone = self.players[owner].zones.locate(id)?;
        Some((owner, zone))
    }

    /// A player's zones.
    #[must_use]
    pub fn zones(&self, player: PlayerId) -> &PlayerZones {
        &self.players[player].zones
    }

    /// Move an instance to another of its owner's zones.
    ///
    /// This is the only place zone lists change after setup: the card is
    /// removed from its current zone and then inserted into `to`. Leaving
    /// play clears damage, rest and link state; entering play stamps the
    /// current turn. Returns the zone the card came from.
    pub fn move_instance(&mut self, id: InstanceId, to: Zone, position: ZonePosition) -> Result<Zone> {
        let owner = self.get(id)?.owner;
        let zones = &self.players[owner].zones;
        let from = zones.locate(id).ok_or(EngineError::UnknownInstance(id))?;
        if to == Zone::Base && from != Zone::Base && zones.base.is_some() {
            return Err(EngineError::InvalidTarget(format!("{owner} already has a base")));
        }

        let zones = &mut self.players[owner].zones;
        zones.remove(id);
        if !zones.insert(id, to, position) {
            // Only the base slot refuses, and `from` was just vacated.
            let restored = zones.insert(id, from, ZonePosition::Top);
            debug_assert!(restored);
            return Err(EngineError::InvalidTarget(format!("{owner} already has a base")));
        }

        let turn = self.turn;
        if let Some(card) = self.instances.get_mut(&id) {
            card.face_down = to.is_hidden();
            if from.is_in_play() && !to.is_in_play() {
                card.reset_play_state();
            }
            if to.is_in_play() && !from.is_in_play() {
                card.entered_turn = Some(turn);
            }
        }
        Ok(from)
    }

    /// Shuffle one of a player's ordered zones.
    pub fn shuffle_zone(&mut self, player: PlayerId, zone: Zone, rng: &mut super::rng::GameRng) {
        self.players[player].zones.shuffle(zone, rng);
    }

    // === Pairing ===

    /// Pair `pilot` with `unit`, writing both back-references.
    pub fn attach_pilot(&mut self, pilot: InstanceId, unit: InstanceId) -> Result<()> {
        self.get(pilot)?;
        self.get(unit)?;
        if let Some(p) = self.instances.get_mut(&pilot) {
            p.attached_unit = Some(unit);
        }
        if let Some(u) = self.instances.get_mut(&unit) {
            u.attached_pilot = Some(pilot);
        }
        Ok(())
    }

    /// Break whatever pairing `id` is part of. Returns the former partner.
    pub fn detach(&mut self, id: InstanceId) -> Option<InstanceId> {
        let card = self.instances.get_mut(&id)?;
        let partner = card.attached_pilot.take().or(card.attached_unit.take());
        card.link_active = false;
        if let Some(partner_id) = partner {
            if let Some(other) = self.instances.get_mut(&partner_id) {
                other.attached_pilot = None;
                other.attached_unit = None;
                other.link_active = false;
            }
        }
        partner
    }

    /// Send a card in play to the discard, taking its paired pilot along.
    ///
    /// Returns every instance that was discarded.
    pub fn discard_from_play(&mut self, id: InstanceId) -> Result<Vec<InstanceId>> {
        let mut discarded = vec![id];
        let partner = self.detach(id);
        self.move_instance(id, Zone::Discard, ZonePosition::Top)?;
        if let Some(pilot) = partner {
            if self.locate(pilot).is_some_and(|(_, z)| z.is_in_play()) {
                self.move_instance(pilot, Zone::Discard, ZonePosition::Top)?;
                discarded.push(pilot);
            }
        }
        Ok(discarded)
    }

    // === Derived stats ===

    /// Printed attack plus any paired pilot's bonus.
    #[must_use]
    pub fn effective_attack(&self, id: InstanceId) -> i32 {
        let Some(card) = self.instance(id) else {
            return 0;
        };
        let bonus = card
            .attached_pilot
            .and_then(|p| self.instance(p))
            .map_or(0, |p| p.definition.pilot_attack_bonus());
        card.definition.attack.saturating_add(bonus)
    }

    /// Printed health plus any paired pilot's bonus.
    #[must_use]
    pub fn effective_health(&self, id: InstanceId) -> i32 {
        let Some(card) = self.instance(id) else {
            return 0;
        };
        let bonus = card
            .attached_pilot
            .and_then(|p| self.instance(p))
            .map_or(0, |p| p.definition.pilot_health_bonus());
        card.definition.health.saturating_add(bonus)
    }

    // === Queries ===

    /// Units (not pilots) in a player's battle area.
    #[must_use]
    pub fn units(&self, player: PlayerId) -> Vec<InstanceId> {
        self.zones(player)
            .battle_area
            .iter()
            .copied()
            .filter(|&id| self.instance(id).is_some_and(|c| c.category() == CardCategory::Unit))
            .collect()
    }

    /// Is `id` a unit in `player`'s battle area?
    #[must_use]
    pub fn is_unit_in_play(&self, player: PlayerId, id: InstanceId) -> bool {
        self.zones(player).contains(Zone::BattleArea, id)
            && self.instance(id).is_some_and(CardInstance::is_unit)
    }

    /// Resource-area cards that are not rested.
    #[must_use]
    pub fn active_resources(&self, player: PlayerId) -> Vec<InstanceId> {
        self.zones(player)
            .resource_area
            .iter()
            .copied()
            .filter(|&id| self.instance(id).is_some_and(|c| !c.rested))
            .collect()
    }

    /// The player who may act inside the open window, if any.
    #[must_use]
    pub fn priority_holder(&self) -> Option<PlayerId> {
        self.priority.as_ref().map(|p| p.current_player)
    }

    // === Draws and game end ===

    /// Draw `count` cards for `player`.
    ///
    /// Drawing from an empty deck loses the game for `player`.
    pub fn draw(&mut self, player: PlayerId, count: u32) -> Result<DrawOutcome> {
        for _ in 0..count {
            let Some(top) = self.zones(player).top(Zone::Deck) else {
                self.log(
                    LogCategory::GameOver,
                    format!("{} cannot draw from an empty deck", self.players[player].name),
                );
                self.declare_winner(player.opponent(), "deck-out");
                return Ok(DrawOutcome::DeckOut);
            };
            self.move_instance(top, Zone::Hand, ZonePosition::Top)?;
        }
        Ok(DrawOutcome::Drawn(count))
    }

    /// End the game in `winner`'s favour.
    pub fn declare_winner(&mut self, winner: PlayerId, reason: &str) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.winner = Some(winner);
        self.players[winner.opponent()].defeated = true;
        self.battle = None;
        self.priority = None;
        self.pending_discards = 0;
        let message = format!("{} wins by {}", self.players[winner].name, reason);
        self.log(LogCategory::GameOver, message);
    }

    // === Log and history ===

    /// Append a line to the event log.
    pub fn log(&mut self, category: LogCategory, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            turn: self.turn,
            category,
            message: message.into(),
        });
    }

    /// Append a successful action to the history.
    pub fn record_action(&mut self, player: PlayerId, action: super::action::GameAction) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn,
            sequence,
        });
    }

    /// Human-readable name of an instance, for log lines.
    #[must_use]
    pub fn card_name(&self, id: InstanceId) -> String {
        self.instance(id)
            .map_or_else(|| id.to_string(), |c| format!("{} ({})", c.name(), id))
    }

    // === Serialization ===

    /// Encode the state for checkpointing.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a checkpoint produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
