//! Rule checks.
//!
//! Pure legality checks (`check_play`, `check_attack`, `check_block`,
//! `validate_deck`) never mutate state. The engine calls them before
//! committing anything and the advisor calls the same functions to
//! enumerate legal actions, so the two can never disagree.

pub mod combat;
pub mod costs;
pub mod deck;
pub mod state_based;

pub use combat::{check_attack, check_block, BattleState, CombatStep};
pub use costs::{check_play, pay, plan_payment, PlayPlan};
pub use deck::{validate_deck, DeckValidation};
pub use state_based::{check_state_based_actions, lethal_cards};
