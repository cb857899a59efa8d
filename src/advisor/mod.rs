//! Legal-action enumeration and a simple advisor.
//!
//! Used for automated play and for checking that the engine accepts
//! exactly what it advertises.

mod enumerate;
mod heuristic;

pub use enumerate::legal_actions;
pub use heuristic::{recommend, score_action, Recommendation};
