//! # rust-tcg
//!
//! A rules engine for a two-player trading card game duel.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: every action is checked in full by a pure
//!    function before any state changes. A rejected action leaves the
//!    state exactly as it was.
//!
//! 2. **One owner**: the `Engine` owns the only mutable `GameState`.
//!    Callers get snapshots, never live references.
//!
//! 3. **Deterministic**: all randomness flows through an injected
//!    `GameRng`, so a seed plus the action history replays a game exactly.
//!
//! ## Architecture
//!
//! - **Arena + id lists**: card instances live in one map keyed by
//!   `InstanceId`; zones hold ids only and cards move through a single
//!   remove-then-insert helper.
//!
//! - **Persistent Data Structures**: O(1) snapshots via `im-rs`.
//!
//! - **Priority windows and a LIFO stack**: two consecutive passes resolve
//!   the top item or close the window.
//!
//! ## Modules
//!
//! - `core`: ids, players, state, actions, RNG, configuration, log
//! - `zones`: per-player zone lists
//! - `cards`: card definitions and instances
//! - `rules`: deck validation, play/attack/block legality, state-based actions
//! - `effects`: effects, scripts and ability-text inference
//! - `stack`: priority windows and the effect stack
//! - `engine`: the action API and phase machine
//! - `advisor`: legal-action enumeration and heuristic recommendations

pub mod advisor;
pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod error;
pub mod rules;
pub mod stack;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionOutcome, ActionRecord, AttackTarget, EngineConfig, GameAction, GameRng, GameRngState,
    GameState, InstanceId, LogCategory, LogEntry, Phase, PlayOptions, PlayerId, PlayerMap,
    PlayerState,
};

pub use crate::zones::{PlayerZones, Zone, ZonePosition};

pub use crate::cards::{CardCategory, CardDefinition, CardId, CardInstance, Color, TokenKind};

pub use crate::rules::{validate_deck, BattleState, CombatStep, DeckValidation};

pub use crate::effects::{Effect, EffectScript, ScriptContext, ScriptRegistry};

pub use crate::stack::{EffectStack, PriorityState, StackItem, WindowKind};

pub use crate::engine::{AutoplayReport, Engine, EngineBuilder, PlayerSetup};

pub use crate::advisor::Recommendation;

pub use crate::error::{EngineError, Result};
