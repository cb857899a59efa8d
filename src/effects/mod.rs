//! Effect system.
//!
//! - `Effect`: closed set of primitive state changes
//! - `ScriptRegistry`: per-card scripts with text inference as fallback
//! - `resolve_effect`: applies one effect to the game state

mod effect;
mod inference;
mod resolver;
mod script;

pub use effect::{Effect, EffectList};
pub use inference::{infer_effects, InferredEffect};
pub use resolver::{resolve_effect, TEMPORARY_RESOURCE_ID};
pub use script::{EffectScript, ScriptContext, ScriptRegistry};
