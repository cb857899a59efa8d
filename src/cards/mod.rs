//! Card system: definitions and instances.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier of a printed card
//! - `CardDefinition`: Immutable printed data, shared via `Arc`
//! - `CardInstance`: Runtime card state (damage, rested, pairing)
//! - `TokenKind`: Marks engine-created synthetic cards

pub mod definition;
pub mod instance;

pub use definition::{CardCategory, CardDefinition, CardId, Color};
pub use instance::{CardInstance, TokenKind};
