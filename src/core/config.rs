//! Rule constants.
//!
//! `EngineConfig` gathers every numeric rule the engine enforces so that
//! variants (smaller decks for tests, a different hand limit) are a matter
//! of configuration rather than code. The defaults are the constructed
//! duel format.

use serde::{Deserialize, Serialize};

/// Deck composition and game-size rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Exact main deck size.
    pub main_deck_size: usize,

    /// Exact resource deck size.
    pub resource_deck_size: usize,

    /// Maximum copies of a card id across both decks.
    pub max_copies: usize,

    /// Maximum number of distinct non-colorless colors.
    pub max_colors: usize,

    /// Cards dealt to each hand at setup.
    pub starting_hand_size: usize,

    /// Shields dealt face-down at setup.
    pub shield_count: usize,

    /// Hand size checked at the end of turn.
    pub max_hand_size: usize,

    /// Maximum cards in the resource area.
    pub max_resources: usize,

    /// Maximum units in the battle area.
    pub max_battle_units: usize,

    /// Attack of the starting base token.
    pub base_attack: i32,

    /// Health of the starting base token.
    pub base_health: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            main_deck_size: 50,
            resource_deck_size: 10,
            max_copies: 4,
            max_colors: 2,
            starting_hand_size: 5,
            shield_count: 6,
            max_hand_size: 10,
            max_resources: 15,
            max_battle_units: 6,
            base_attack: 0,
            base_health: 3,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the required deck sizes.
    #[must_use]
    pub fn with_deck_sizes(mut self, main: usize, resource: usize) -> Self {
        self.main_deck_size = main;
        self.resource_deck_size = resource;
        self
    }

    /// Set the number of shields dealt at setup.
    #[must_use]
    pub fn with_shield_count(mut self, count: usize) -> Self {
        self.shield_count = count;
        self
    }

    /// Cards a legal main deck has left after the opening deal.
    #[must_use]
    pub fn deck_after_setup(&self) -> usize {
        self.main_deck_size
            .saturating_sub(self.starting_hand_size + self.shield_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.main_deck_size, 50);
        assert_eq!(config.resource_deck_size, 10);
        assert_eq!(config.deck_after_setup(), 39);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_max_hand_size(7)
            .with_deck_sizes(20, 5)
            .with_shield_count(2);

        assert_eq!(config.max_hand_size, 7);
        assert_eq!(config.main_deck_size, 20);
        assert_eq!(config.resource_deck_size, 5);
        assert_eq!(config.deck_after_setup(), 13);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
