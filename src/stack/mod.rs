//! Priority windows and the effect stack.
//!
//! - `PriorityState`: whose turn it is to act inside an open window and how
//!   many consecutive passes have happened
//! - `EffectStack`: LIFO queue of `StackItem`s awaiting resolution
//!
//! The rules for what happens when a window closes live in the engine; this
//! module only tracks the bookkeeping.

mod items;
mod priority;

pub use items::{EffectStack, StackItem, StackItemId};
pub use priority::{PriorityState, WindowKind, PASSES_TO_CLOSE};
