//! In-memory event log.
//!
//! The game log is append-only: entries are pushed as the engine changes
//! state and are never edited or removed. Entries carry a category so
//! callers can filter (e.g. only combat lines) without parsing text.

use serde::{Deserialize, Serialize};

/// What part of the engine produced a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    Setup,
    Phase,
    Priority,
    Play,
    Combat,
    Effect,
    StateBased,
    GameOver,
}

/// One human-readable event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn the event happened on.
    pub turn: u32,
    pub category: LogCategory,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[T{} {:?}] {}", self.turn, self.category, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let entry = LogEntry {
            turn: 3,
            category: LogCategory::Combat,
            message: "Zaku attacks".to_string(),
        };
        assert_eq!(entry.to_string(), "[T3 Combat] Zaku attacks");
    }
}
