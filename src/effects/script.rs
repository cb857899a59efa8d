//! Effect scripts and the two-tier effect lookup.
//!
//! A script is a plain closure from a `ScriptContext` to a list of
//! effects. Scripts are registered per `CardId`; when a card has no
//! script, its ability text goes through `infer_effects`. Both tiers sit
//! behind `ScriptRegistry::prepare`, so registering a script for a card
//! simply shadows whatever would have been inferred.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::effect::{Effect, EffectList};
use super::inference::infer_effects;
use crate::cards::{CardDefinition, CardId};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::error::Result;

/// Everything a script may look at when it runs.
///
/// Scripts run when the card is played, against the state as it is at
/// that moment; the effects they return resolve later from the stack.
pub struct ScriptContext<'a> {
    pub state: &'a GameState,
    pub controller: PlayerId,
    pub opponent: PlayerId,
    pub source: InstanceId,
    pub target: Option<InstanceId>,
}

type ScriptFn = dyn Fn(&ScriptContext<'_>) -> Result<Vec<Effect>> + Send + Sync;

/// A registered effect handler.
///
/// ```
/// use rust_tcg::effects::{Effect, EffectScript};
///
/// let script = EffectScript::new(|ctx| Ok(vec![Effect::draw(ctx.controller, 1)]));
/// assert!(!script.requires_target());
/// ```
#[derive(Clone)]
pub struct EffectScript {
    requires_target: bool,
    handler: Arc<ScriptFn>,
}

impl EffectScript {
    /// Wrap a handler.
    pub fn new(
        handler: impl Fn(&ScriptContext<'_>) -> Result<Vec<Effect>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requires_target: false,
            handler: Arc::new(handler),
        }
    }

    /// Require a target unit at play time.
    #[must_use]
    pub fn with_target(mut self) -> Self {
        self.requires_target = true;
        self
    }

    #[must_use]
    pub fn requires_target(&self) -> bool {
        self.requires_target
    }

    /// Run the handler.
    pub fn run(&self, ctx: &ScriptContext<'_>) -> Result<Vec<Effect>> {
        (self.handler)(ctx)
    }
}

impl std::fmt::Debug for EffectScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectScript")
            .field("requires_target", &self.requires_target)
            .finish_non_exhaustive()
    }
}

/// Scripts keyed by card id.
#[derive(Clone, Debug, Default)]
pub struct ScriptRegistry {
    scripts: FxHashMap<CardId, EffectScript>,
}

impl ScriptRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the script for `card`.
    pub fn register(&mut self, card: impl Into<CardId>, script: EffectScript) {
        self.scripts.insert(card.into(), script);
    }

    /// Builder form of `register`.
    #[must_use]
    pub fn with(mut self, card: impl Into<CardId>, script: EffectScript) -> Self {
        self.register(card, script);
        self
    }

    #[must_use]
    pub fn get(&self, card: &CardId) -> Option<&EffectScript> {
        self.scripts.get(card)
    }

    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.scripts.contains_key(card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Does playing `definition` need a target unit?
    #[must_use]
    pub fn requires_target(&self, definition: &CardDefinition) -> bool {
        match self.get(&definition.id) {
            Some(script) => script.requires_target(),
            None => infer_effects(&definition.text)
                .into_iter()
                .any(|e| e.requires_target()),
        }
    }

    /// Produce the effects a card puts on the stack.
    ///
    /// Uses the registered script if there is one, otherwise the inferred
    /// effects. Text that yields nothing becomes a single log effect.
    pub fn prepare(&self, definition: &CardDefinition, ctx: &ScriptContext<'_>) -> Result<EffectList> {
        if let Some(script) = self.get(&definition.id) {
            return Ok(script.run(ctx)?.into_iter().collect());
        }

        let effects: EffectList = infer_effects(&definition.text)
            .into_iter()
            .filter_map(|e| e.bind(ctx.controller, ctx.target))
            .collect();
        if effects.is_empty() {
            let mut fallback = EffectList::new();
            fallback.push(Effect::log(format!("{} has no effect to resolve", definition.name)));
            return Ok(fallback);
        }
        Ok(effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;
    use crate::core::EngineConfig;
    use crate::error::EngineError;

    fn state() -> GameState {
        GameState::new(EngineConfig::default(), ["A", "B"], PlayerId::ONE)
    }

    fn ctx(state: &GameState, target: Option<InstanceId>) -> ScriptContext<'_> {
        ScriptContext {
            state,
            controller: PlayerId::ONE,
            opponent: PlayerId::TWO,
            source: InstanceId(1),
            target,
        }
    }

    #[test]
    fn test_inferred_draw() {
        let registry = ScriptRegistry::new();
        let card = CardDefinition::command("C-1", "Resupply", Color::Blue, 1, "Draw 2 cards.");
        let s = state();

        assert!(!registry.requires_target(&card));
        let effects = registry.prepare(&card, &ctx(&s, None)).unwrap();
        assert_eq!(effects.as_slice(), &[Effect::draw(PlayerId::ONE, 2)]);
    }

    #[test]
    fn test_script_shadows_inference() {
        let card = CardDefinition::command("C-1", "Resupply", Color::Blue, 1, "Draw 2 cards.");
        let registry = ScriptRegistry::new().with(
            "C-1",
            EffectScript::new(|ctx| Ok(vec![Effect::damage_base(ctx.opponent, 1)])),
        );
        let s = state();

        let effects = registry.prepare(&card, &ctx(&s, None)).unwrap();
        assert_eq!(effects.as_slice(), &[Effect::damage_base(PlayerId::TWO, 1)]);
    }

    #[test]
    fn test_targeted_script() {
        let card = CardDefinition::command("C-2", "Snipe", Color::Red, 1, "");
        let registry = ScriptRegistry::new().with(
            "C-2",
            EffectScript::new(|ctx| match ctx.target {
                Some(t) => Ok(vec![Effect::destroy(t)]),
                None => Err(EngineError::Script("no target".into())),
            })
            .with_target(),
        );
        assert!(registry.requires_target(&card));

        let s = state();
        let effects = registry.prepare(&card, &ctx(&s, Some(InstanceId(9)))).unwrap();
        assert_eq!(effects.as_slice(), &[Effect::destroy(InstanceId(9))]);
        assert!(registry.prepare(&card, &ctx(&s, None)).is_err());
    }

    #[test]
    fn test_unrecognised_text_logs() {
        let registry = ScriptRegistry::new();
        let card = CardDefinition::command("C-3", "Bluff", Color::Green, 0, "Look at the top card of your deck.");
        let s = state();

        let effects = registry.prepare(&card, &ctx(&s, None)).unwrap();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Log { .. }));
    }
}
