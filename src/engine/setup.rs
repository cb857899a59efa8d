//! Engine construction and the opening deal.

use std::sync::Arc;

use super::{Engine, PlayerSetup};
use crate::cards::{CardDefinition, CardInstance, Color, TokenKind};
use crate::core::{EngineConfig, GameRng, GameState, LogCategory, Phase, PlayerId};
use crate::effects::ScriptRegistry;
use crate::error::{EngineError, Result};
use crate::rules::validate_deck;
use crate::zones::{Zone, ZonePosition};

/// Card id of the base every player starts with.
pub const STARTING_BASE_ID: &str = "TOKEN-EX-BASE";

/// Card id of the second player's bonus resource.
pub const BONUS_RESOURCE_ID: &str = "TOKEN-EX-RESOURCE";

/// Builder for an `Engine`.
///
/// Defaults: player one starts, decks are validated, no scripts, seed 0,
/// standard rule constants.
pub struct EngineBuilder {
    players: [PlayerSetup; 2],
    starting_player: PlayerId,
    validate_decks: bool,
    scripts: ScriptRegistry,
    rng: Option<GameRng>,
    config: EngineConfig,
}

impl EngineBuilder {
    #[must_use]
    pub fn new(first: PlayerSetup, second: PlayerSetup) -> Self {
        Self {
            players: [first, second],
            starting_player: PlayerId::ONE,
            validate_decks: true,
            scripts: ScriptRegistry::new(),
            rng: None,
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = player;
        self
    }

    #[must_use]
    pub fn validate_decks(mut self, validate: bool) -> Self {
        self.validate_decks = validate;
        self
    }

    #[must_use]
    pub fn scripts(mut self, scripts: ScriptRegistry) -> Self {
        self.scripts = scripts;
        self
    }

    /// Seed the shuffle generator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(GameRng::new(seed));
        self
    }

    /// Use a prepared generator (seeded or injected).
    #[must_use]
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = Some(rng);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate, shuffle and deal.
    ///
    /// Fails with `InvalidDecks` listing every violation of both players
    /// when validation is on; no engine is produced in that case.
    pub fn build(self) -> Result<Engine> {
        if self.validate_decks {
            let errors: Vec<String> = self
                .players
                .iter()
                .flat_map(|setup| {
                    validate_deck(&self.config, &setup.main_deck, &setup.resource_deck)
                        .errors
                        .into_iter()
                        .map(move |e| format!("{}: {e}", setup.name))
                })
                .collect();
            if !errors.is_empty() {
                return Err(EngineError::InvalidDecks(errors));
            }
        }

        let mut rng = self.rng.unwrap_or_else(|| GameRng::new(0));
        let names = [self.players[0].name.as_str(), self.players[1].name.as_str()];
        let mut state = GameState::new(self.config.clone(), names, self.starting_player);

        for (setup, player) in self.players.iter().zip(PlayerId::all()) {
            deal(&mut state, &mut rng, player, setup)?;
        }

        let second = self.starting_player.opponent();
        let bonus = Arc::new(CardDefinition::resource(BONUS_RESOURCE_ID, "EX Resource"));
        let id = state.alloc_instance();
        state.insert_instance(
            CardInstance::token(id, second, bonus, TokenKind::BonusResource),
            Zone::ResourceArea,
        )?;

        let first_name = state.players[self.starting_player].name.clone();
        let second_name = state.players[second].name.clone();
        state.log(
            LogCategory::Setup,
            format!("{first_name} goes first; {second_name} receives a bonus resource"),
        );
        state.phase = Phase::Start;
        state.log(LogCategory::Phase, format!("Turn 1: {first_name}'s start phase"));

        Ok(Engine::from_state(state, rng, self.scripts))
    }
}

fn deal(state: &mut GameState, rng: &mut GameRng, player: PlayerId, setup: &PlayerSetup) -> Result<()> {
    for card in &setup.main_deck {
        state.create_instance(player, Arc::clone(card), Zone::Deck)?;
    }
    for card in &setup.resource_deck {
        state.create_instance(player, Arc::clone(card), Zone::ResourceDeck)?;
    }
    state.shuffle_zone(player, Zone::Deck, rng);
    state.shuffle_zone(player, Zone::ResourceDeck, rng);

    for _ in 0..state.config.starting_hand_size {
        let Some(top) = state.zones(player).top(Zone::Deck) else { break };
        state.move_instance(top, Zone::Hand, ZonePosition::Top)?;
    }
    for _ in 0..state.config.shield_count {
        let Some(top) = state.zones(player).top(Zone::Deck) else { break };
        state.move_instance(top, Zone::Shields, ZonePosition::Top)?;
    }

    let base = Arc::new(CardDefinition::base(
        STARTING_BASE_ID,
        "EX Base",
        Color::Colorless,
        0,
        0,
        state.config.base_attack,
        state.config.base_health,
    ));
    let id = state.alloc_instance();
    state.insert_instance(CardInstance::token(id, player, base, TokenKind::StartingBase), Zone::Base)?;

    let zones = state.zones(player);
    let message = format!(
        "{} draws {} cards and sets {} shields",
        setup.name,
        zones.len(Zone::Hand),
        zones.len(Zone::Shields)
    );
    state.log(LogCategory::Setup, message);
    Ok(())
}
