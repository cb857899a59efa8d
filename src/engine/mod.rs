//! The duel engine.
//!
//! `Engine` owns one `GameState` and is the only thing that mutates it.
//! Callers drive the game through the action methods; each one validates
//! fully before committing, then runs a state-based action sweep before
//! returning.
//!
//! ## Action API
//!
//! | Method | Legal when |
//! |--------|------------|
//! | `advance_to_next_phase` | start, draw and resource phases |
//! | `play_card` | see `rules::check_play` |
//! | `declare_attack` | main window, active player holding priority |
//! | `declare_block` | block step, defending player |
//! | `pass_priority` | holding priority in an open window |
//! | `discard_for_hand_limit` | a hand-limit discard is pending |
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_tcg::cards::{CardDefinition, Color};
//! use rust_tcg::core::{EngineConfig, Phase};
//! use rust_tcg::engine::{EngineBuilder, PlayerSetup};
//!
//! let unit = Arc::new(CardDefinition::unit("U-1", "GM", Color::White, 1, 1, 2, 2));
//! let resource = Arc::new(CardDefinition::resource("R-1", "Resource"));
//! let deck = |name: &str| PlayerSetup::new(name, vec![unit.clone(); 50], vec![resource.clone(); 10]);
//!
//! let mut engine = EngineBuilder::new(deck("Amuro"), deck("Char"))
//!     .validate_decks(false)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! engine.advance_to_next_phase().unwrap();
//! engine.advance_to_next_phase().unwrap();
//! engine.advance_to_next_phase().unwrap();
//! assert_eq!(engine.state().phase, Phase::Main);
//! ```

mod autoplay;
mod combat;
mod phases;
mod play;
mod priority;
mod setup;

use std::sync::Arc;

pub use autoplay::AutoplayReport;
pub use setup::EngineBuilder;

use crate::advisor::{self, Recommendation};
use crate::cards::{CardDefinition, CardId};
use crate::core::{GameAction, GameRng, GameState, PlayerId};
use crate::effects::{EffectScript, ScriptRegistry};
use crate::error::{EngineError, Result};
use crate::rules::check_state_based_actions;

/// One player's seat at construction time.
#[derive(Clone, Debug)]
pub struct PlayerSetup {
    pub name: String,
    pub main_deck: Vec<Arc<CardDefinition>>,
    pub resource_deck: Vec<Arc<CardDefinition>>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        main_deck: Vec<Arc<CardDefinition>>,
        resource_deck: Vec<Arc<CardDefinition>>,
    ) -> Self {
        Self {
            name: name.into(),
            main_deck,
            resource_deck,
        }
    }
}

/// A running duel.
pub struct Engine {
    state: GameState,
    rng: GameRng,
    scripts: ScriptRegistry,
}

impl Engine {
    /// Resume from a snapshot.
    ///
    /// The state is taken as-is; no validation or setup runs.
    #[must_use]
    pub fn from_state(state: GameState, rng: GameRng, scripts: ScriptRegistry) -> Self {
        Self { state, rng, scripts }
    }

    /// Read-only view of the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// An independent copy of the current state.
    ///
    /// Later actions on the engine never show up in a snapshot that was
    /// already taken.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn scripts(&self) -> &ScriptRegistry {
        &self.scripts
    }

    /// Attach or replace the script for a card id.
    pub fn register_script(&mut self, card: impl Into<CardId>, script: EffectScript) {
        self.scripts.register(card, script);
    }

    /// Every action `player` may legally take right now.
    #[must_use]
    pub fn get_legal_actions(&self, player: PlayerId) -> Vec<GameAction> {
        advisor::legal_actions(&self.state, &self.scripts, player)
    }

    /// The best-scoring legal action for `player`, if there is any.
    #[must_use]
    pub fn recommend_action(&self, player: PlayerId) -> Option<Recommendation> {
        advisor::recommend(&self.state, &self.scripts, player)
    }

    fn ensure_running(&self) -> Result<()> {
        if self.state.game_over {
            Err(EngineError::GameOver)
        } else {
            Ok(())
        }
    }

    fn sweep(&mut self) -> Result<()> {
        check_state_based_actions(&mut self.state)?;
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("turn", &self.state.turn)
            .field("phase", &self.state.phase)
            .field("active_player", &self.state.active_player)
            .field("game_over", &self.state.game_over)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}
