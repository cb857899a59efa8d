//! The effect stack.
//!
//! Stack items resolve in strict LIFO order: the most recently pushed item
//! is always the next to resolve.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId};
use crate::effects::EffectList;

/// Unique identifier for a stack item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackItemId(pub u32);

impl std::fmt::Display for StackItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackItem({})", self.0)
    }
}

/// A queued bundle of effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackItem {
    pub id: StackItemId,

    /// Who put the item on the stack.
    pub controller: PlayerId,

    /// Card that produced the item.
    pub source: Option<InstanceId>,

    pub description: String,

    /// Applied in order when the item resolves.
    pub effects: EffectList,
}

/// LIFO stack of pending items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStack {
    /// Bottom first, top last.
    items: Vector<StackItem>,
    next_id: u32,
}

impl EffectStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new item on top. Returns its id.
    pub fn push(
        &mut self,
        controller: PlayerId,
        source: Option<InstanceId>,
        description: impl Into<String>,
        effects: EffectList,
    ) -> StackItemId {
        let id = StackItemId(self.next_id);
        self.next_id += 1;
        self.items.push_back(StackItem {
            id,
            controller,
            source,
            description: description.into(),
            effects,
        });
        id
    }

    /// Remove and return the top item.
    pub fn pop(&mut self) -> Option<StackItem> {
        self.items.pop_back()
    }

    /// Peek at the top of the stack without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&StackItem> {
        self.items.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackItem> {
        self.items.iter()
    }
}
