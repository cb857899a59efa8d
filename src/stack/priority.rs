//! Priority windows.
//!
//! A window is a period in which the two players alternately act or pass.
//! Two consecutive passes either resolve the top of the effect stack or,
//! if the stack is empty, close the window. What closing means depends on
//! the window kind and is decided by the engine.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Which window is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    /// The active player's main phase.
    Main,
    /// The action step of a battle.
    Battle,
    /// The end phase.
    End,
}

impl WindowKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WindowKind::Main => "main",
            WindowKind::Battle => "battle",
            WindowKind::End => "end",
        }
    }
}

/// Number of consecutive passes that ends a round of priority.
pub const PASSES_TO_CLOSE: u8 = 2;

/// An open priority window.
///
/// ## Example
///
/// ```
/// use rust_tcg::core::PlayerId;
/// use rust_tcg::stack::{PriorityState, WindowKind};
///
/// let mut window = PriorityState::open(WindowKind::Main, PlayerId::ONE);
/// assert!(!window.pass());
/// assert_eq!(window.current_player, PlayerId::TWO);
/// assert!(window.pass());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityState {
    pub window: WindowKind,

    /// Player who may act now.
    pub current_player: PlayerId,

    /// Passes since the last action or resolution.
    pub consecutive_passes: u8,
}

impl PriorityState {
    /// Open a window with `first` holding priority.
    #[must_use]
    pub fn open(window: WindowKind, first: PlayerId) -> Self {
        Self {
            window,
            current_player: first,
            consecutive_passes: 0,
        }
    }

    /// The holder passes.
    ///
    /// Returns `true` once both players have passed in a row.
    pub fn pass(&mut self) -> bool {
        self.consecutive_passes += 1;
        self.current_player = self.current_player.opponent();
        self.consecutive_passes >= PASSES_TO_CLOSE
    }

    /// `actor` played a card or declared something; the opponent responds.
    pub fn respond_to(&mut self, actor: PlayerId) {
        self.consecutive_passes = 0;
        self.current_player = actor.opponent();
    }

    /// Give priority to `player` with a fresh pass count.
    pub fn reset_to(&mut self, player: PlayerId) {
        self.consecutive_passes = 0;
        self.current_player = player;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_passes_close() {
        let mut window = PriorityState::open(WindowKind::End, PlayerId::TWO);
        assert!(!window.pass());
        assert_eq!(window.current_player, PlayerId::ONE);
        assert!(window.pass());
        assert_eq!(window.current_player, PlayerId::TWO);
    }

    #[test]
    fn test_respond_resets_passes() {
        let mut window = PriorityState::open(WindowKind::Main, PlayerId::ONE);
        window.pass();
        assert_eq!(window.consecutive_passes, 1);

        window.respond_to(PlayerId::TWO);
        assert_eq!(window.consecutive_passes, 0);
        assert_eq!(window.current_player, PlayerId::ONE);

        assert!(!window.pass());
        assert!(window.pass());
    }

    #[test]
    fn test_reset_to() {
        let mut window = PriorityState::open(WindowKind::Battle, PlayerId::TWO);
        window.pass();
        window.reset_to(PlayerId::ONE);
        assert_eq!(window.consecutive_passes, 0);
        assert_eq!(window.current_player, PlayerId::ONE);
    }
}
