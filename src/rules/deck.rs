//! Deck construction rules.
//!
//! Validation is a pure function over card definitions. Every rule is
//! checked independently and every violation is reported; nothing
//! short-circuits.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, Color};
use crate::core::EngineConfig;

/// Outcome of validating one player's decks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl DeckValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check a main deck and resource deck against the construction rules.
///
/// ```
/// use std::sync::Arc;
/// use rust_tcg::cards::{CardDefinition, Color};
/// use rust_tcg::core::EngineConfig;
/// use rust_tcg::rules::validate_deck;
///
/// let config = EngineConfig::default();
/// let unit = Arc::new(CardDefinition::unit("U-1", "GM", Color::White, 1, 1, 1, 1));
/// let result = validate_deck(&config, &vec![unit; 3], &[]);
///
/// assert!(!result.valid);
/// assert_eq!(result.errors.len(), 2);
/// ```
#[must_use]
pub fn validate_deck(
    config: &EngineConfig,
    main_deck: &[Arc<CardDefinition>],
    resource_deck: &[Arc<CardDefinition>],
) -> DeckValidation {
    let mut errors = Vec::new();

    if main_deck.len() != config.main_deck_size {
        errors.push(format!(
            "main deck has {} cards (must be exactly {})",
            main_deck.len(),
            config.main_deck_size
        ));
    }
    if resource_deck.len() != config.resource_deck_size {
        errors.push(format!(
            "resource deck has {} cards (must be exactly {})",
            resource_deck.len(),
            config.resource_deck_size
        ));
    }

    let mut copies: BTreeMap<&CardId, usize> = BTreeMap::new();
    let mut colors: BTreeSet<Color> = BTreeSet::new();
    for card in main_deck.iter().chain(resource_deck) {
        *copies.entry(&card.id).or_default() += 1;
        if !card.color.is_colorless() {
            colors.insert(card.color);
        }
    }

    for (id, count) in copies {
        if count > config.max_copies {
            errors.push(format!(
                "card {id} appears {count} times (at most {} allowed)",
                config.max_copies
            ));
        }
    }

    if colors.len() > config.max_colors {
        let names: Vec<String> = colors.iter().map(|c| format!("{c:?}")).collect();
        errors.push(format!(
            "deck uses {} colors ({}), at most {} allowed",
            colors.len(),
            names.join(", "),
            config.max_colors
        ));
    }

    DeckValidation::from_errors(errors)
}
