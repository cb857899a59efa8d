//! Passing priority and resolving the stack.
//!
//! Two consecutive passes with items on the stack resolve the top item and
//! hand priority back to the active player; the window stays open. Two
//! consecutive passes with an empty stack close the window.

use super::Engine;
use crate::core::{GameAction, InstanceId, LogCategory, Phase, PlayerId};
use crate::effects::{resolve_effect, EffectList};
use crate::error::{EngineError, Result};
use crate::rules::check_state_based_actions;
use crate::stack::WindowKind;

impl Engine {
    /// The priority holder declines to act.
    pub fn pass_priority(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_running()?;
        let Some(window) = self.state.priority.as_ref() else {
            return Err(EngineError::WrongPhase {
                action: "pass priority",
                phase: self.state.phase,
            });
        };
        if window.current_player != player {
            return Err(EngineError::NoPriority(player));
        }

        self.state.record_action(player, GameAction::PassPriority);
        let name = self.state.players[player].name.clone();
        self.state.log(LogCategory::Priority, format!("{name} passes"));

        let Some(window) = self.state.priority.as_mut() else {
            return Ok(());
        };
        let kind = window.window;
        if !window.pass() {
            return Ok(());
        }

        if self.state.stack.is_empty() {
            self.close_window(kind)
        } else {
            self.resolve_top()
        }
    }

    /// Put a bundle of effects on the stack.
    pub(super) fn push_stack_item(
        &mut self,
        controller: PlayerId,
        source: Option<InstanceId>,
        description: String,
        effects: EffectList,
    ) {
        let id = self.state.stack.push(controller, source, description.clone(), effects);
        self.state.log(LogCategory::Priority, format!("{description} goes on the stack ({id})"));
    }

    /// Pop and resolve the top stack item.
    ///
    /// State-based actions run after every effect; resolution stops as
    /// soon as the game is over.
    fn resolve_top(&mut self) -> Result<()> {
        let Some(item) = self.state.stack.pop() else {
            return Ok(());
        };
        self.state.log(LogCategory::Effect, format!("Resolving {}", item.description));

        for effect in &item.effects {
            resolve_effect(&mut self.state, effect)?;
            if self.state.game_over {
                return Ok(());
            }
            check_state_based_actions(&mut self.state)?;
        }

        let active = self.state.active_player;
        if let Some(window) = self.state.priority.as_mut() {
            window.reset_to(active);
        }
        Ok(())
    }

    fn close_window(&mut self, kind: WindowKind) -> Result<()> {
        self.state
            .log(LogCategory::Priority, format!("{} window closes", kind.name()));
        match kind {
            WindowKind::Main => {
                self.state.priority = None;
                self.enter_phase(Phase::End)
            }
            WindowKind::Battle => self.resolve_combat_damage(),
            WindowKind::End => self.finish_end_phase(),
        }
    }
}
