//! Turn phases.

use serde::{Deserialize, Serialize};

/// Phases of a turn, in cyclic order.
///
/// `Battle` is entered only through an attack declaration and always
/// returns to `Main`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Draw,
    Resource,
    Main,
    Battle,
    End,
}

impl Phase {
    /// Can the active player request `advance_to_next_phase` here?
    ///
    /// Only phases without a priority window advance on request.
    #[must_use]
    pub fn is_advanceable(self) -> bool {
        matches!(self, Phase::Start | Phase::Draw | Phase::Resource)
    }

    /// The phase reached by an explicit advance request, if any.
    #[must_use]
    pub fn next_on_advance(self) -> Option<Phase> {
        match self {
            Phase::Start => Some(Phase::Draw),
            Phase::Draw => Some(Phase::Resource),
            Phase::Resource => Some(Phase::Main),
            Phase::Main | Phase::Battle | Phase::End => None,
        }
    }

    /// Lower-case name used in log lines.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Draw => "draw",
            Phase::Resource => "resource",
            Phase::Main => "main",
            Phase::Battle => "battle",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
