//! Core engine types: ids, players, state, actions, RNG, configuration.
//!
//! Everything here is plain data plus small helpers. Rule enforcement lives
//! in `rules` and `engine`.

pub mod action;
pub mod config;
pub mod entity;
pub mod log;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionOutcome, ActionRecord, AttackTarget, GameAction, PlayOptions};
pub use config::EngineConfig;
pub use entity::InstanceId;
pub use log::{LogCategory, LogEntry};
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState, RandomFn};
pub use state::{DrawOutcome, GameState, PlayerState};
