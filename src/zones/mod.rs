//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: The named zones every player owns
//! - `PlayerZones`: One player's zone lists (ids only)
//! - `ZonePosition`: Top or bottom insertion for ordered zones

pub mod manager;

pub use manager::{PlayerZones, Zone, ZonePosition};
