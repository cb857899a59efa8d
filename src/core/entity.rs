//! Card instance identification.
//!
//! Every physical card in a game (including synthetic tokens such as the
//! starting base) has a unique `InstanceId`. Ids are allocated
//! monotonically by `GameState::alloc_instance` and never reused, so a
//! stale id can never alias a newer card.
//!
//! ```
//! use rust_tcg::core::InstanceId;
//!
//! let id = InstanceId(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.next(), InstanceId(8));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// The first id handed out in a new game.
    pub const FIRST: InstanceId = InstanceId(1);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
