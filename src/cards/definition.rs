//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable printed properties of a card.
//! Definitions arrive fully resolved from an external catalog; the engine
//! shares them between instances through `Arc` and never mutates them.
//!
//! Instance-specific data (damage taken, rested, zone) is stored
//! separately in `CardInstance`.

use serde::{Deserialize, Serialize};

/// Catalog identifier of a card (e.g. `"ST01-001"`).
///
/// This identifies the printed card, not a copy of it in a game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Card color. `Colorless` never counts toward the deck color limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Red,
    White,
    Purple,
    Colorless,
}

impl Color {
    #[must_use]
    pub fn is_colorless(self) -> bool {
        self == Color::Colorless
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Unit,
    Pilot,
    Command,
    Base,
    Resource,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_tcg::cards::{CardDefinition, CardCategory, Color};
///
/// let gundam = CardDefinition::unit("ST01-001", "Gundam", Color::Blue, 3, 4, 3, 4)
///     .with_link("Amuro Ray");
///
/// assert_eq!(gundam.category, CardCategory::Unit);
/// assert_eq!(gundam.attack, 3);
/// assert_eq!(gundam.link_condition.as_deref(), Some("Amuro Ray"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub color: Color,
    pub category: CardCategory,

    /// Active resources rested to play the card.
    pub cost: u32,

    /// Total resources required in play (ignored for commands).
    pub level: u32,

    /// Printed attack (units, pilots, bases).
    pub attack: i32,

    /// Printed health (units, bases).
    pub health: i32,

    #[serde(default)]
    pub traits: Vec<String>,

    /// Pilot name or trait that links with this unit.
    #[serde(default)]
    pub link_condition: Option<String>,

    /// Attack bonus a pilot grants its unit. Falls back to `attack`.
    #[serde(default)]
    pub ap_modifier: Option<i32>,

    /// Health bonus a pilot grants its unit. Falls back to `health`.
    #[serde(default)]
    pub hp_modifier: Option<i32>,

    /// Ability text.
    #[serde(default)]
    pub text: String,
}

impl CardDefinition {
    fn blank(id: impl Into<String>, name: impl Into<String>, color: Color, category: CardCategory) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            color,
            category,
            cost: 0,
            level: 0,
            attack: 0,
            health: 0,
            traits: Vec::new(),
            link_condition: None,
            ap_modifier: None,
            hp_modifier: None,
            text: String::new(),
        }
    }

    /// A unit with printed cost, level and stats.
    #[must_use]
    pub fn unit(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        cost: u32,
        level: u32,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            cost,
            level,
            attack,
            health,
            ..Self::blank(id, name, color, CardCategory::Unit)
        }
    }

    /// A pilot granting `ap`/`hp` to the unit it pairs with.
    #[must_use]
    pub fn pilot(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        cost: u32,
        level: u32,
        ap: i32,
        hp: i32,
    ) -> Self {
        Self {
            cost,
            level,
            ap_modifier: Some(ap),
            hp_modifier: Some(hp),
            ..Self::blank(id, name, color, CardCategory::Pilot)
        }
    }

    /// A command with ability text.
    #[must_use]
    pub fn command(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        cost: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            cost,
            text: text.into(),
            ..Self::blank(id, name, color, CardCategory::Command)
        }
    }

    /// A base with printed stats.
    #[must_use]
    pub fn base(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        cost: u32,
        level: u32,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            cost,
            level,
            attack,
            health,
            ..Self::blank(id, name, color, CardCategory::Base)
        }
    }

    /// A plain resource card.
    #[must_use]
    pub fn resource(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::blank(id, name, Color::Colorless, CardCategory::Resource)
    }

    /// Set ability text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set traits.
    #[must_use]
    pub fn with_traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    /// Set the link condition.
    #[must_use]
    pub fn with_link(mut self, condition: impl Into<String>) -> Self {
        self.link_condition = Some(condition.into());
        self
    }

    /// Set a pilot's printed stats, used when no modifier is given.
    #[must_use]
    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    /// Clear a pilot's explicit modifiers so its printed stats apply.
    #[must_use]
    pub fn without_modifiers(mut self) -> Self {
        self.ap_modifier = None;
        self.hp_modifier = None;
        self
    }

    /// Attack bonus granted when paired as a pilot.
    #[must_use]
    pub fn pilot_attack_bonus(&self) -> i32 {
        self.ap_modifier.unwrap_or(self.attack)
    }

    /// Health bonus granted when paired as a pilot.
    #[must_use]
    pub fn pilot_health_bonus(&self) -> i32 {
        self.hp_modifier.unwrap_or(self.health)
    }

    /// Does `pilot` satisfy this unit's link condition?
    ///
    /// The condition matches the pilot's name or one of its traits,
    /// ignoring case and surrounding `[]`/`()`.
    #[must_use]
    pub fn links_with(&self, pilot: &CardDefinition) -> bool {
        let Some(condition) = self.link_condition.as_deref() else {
            return false;
        };
        let wanted = normalize_link(condition);
        if wanted.is_empty() {
            return false;
        }
        normalize_link(&pilot.name) == wanted
            || pilot.traits.iter().any(|t| normalize_link(t) == wanted)
    }
}

fn normalize_link(s: &str) -> String {
    s.trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '(' | ')'))
        .trim()
        .to_lowercase()
}
