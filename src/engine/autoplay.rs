//! Action dispatch and automated play.

use serde::{Deserialize, Serialize};

use super::Engine;
use crate::core::{GameAction, PlayerId};
use crate::error::{EngineError, Result};
use crate::rules::CombatStep;

/// Summary of an `autoplay` run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayReport {
    /// Actions applied.
    pub steps: usize,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl Engine {
    /// Who has to act next, if anyone.
    ///
    /// In order: a pending hand-limit discard, a block declaration, the
    /// priority holder, then the active player in an advanceable phase.
    #[must_use]
    pub fn awaiting_player(&self) -> Option<PlayerId> {
        let state = &self.state;
        if state.game_over {
            return None;
        }
        if state.pending_discards > 0 {
            return Some(state.active_player);
        }
        if let Some(battle) = state.battle.as_ref().filter(|b| b.step == CombatStep::Block) {
            return Some(battle.defending_player);
        }
        if let Some(holder) = state.priority_holder() {
            return Some(holder);
        }
        state.phase.is_advanceable().then_some(state.active_player)
    }

    /// Route a `GameAction` to the matching action method.
    pub fn apply(&mut self, player: PlayerId, action: &GameAction) -> Result<()> {
        match *action {
            GameAction::AdvancePhase => {
                self.ensure_running()?;
                if player != self.state.active_player {
                    return Err(EngineError::NotActivePlayer(player));
                }
                self.advance_to_next_phase()
            }
            GameAction::PlayCard { card, options } => self.play_card(player, card, options),
            GameAction::DeclareAttack { attacker, target } => self.declare_attack(player, attacker, target),
            GameAction::DeclareBlock { blocker } => self.declare_block(player, blocker),
            GameAction::PassPriority => self.pass_priority(player),
            GameAction::DiscardForHandLimit { card } => self.discard_for_hand_limit(player, card),
        }
    }

    /// Let the advisor play both sides for at most `max_steps` actions.
    pub fn autoplay(&mut self, max_steps: usize) -> Result<AutoplayReport> {
        let mut steps = 0;
        while steps < max_steps {
            let Some(player) = self.awaiting_player() else {
                break;
            };
            let Some(recommendation) = self.recommend_action(player) else {
                break;
            };
            self.apply(player, &recommendation.action)?;
            steps += 1;
        }
        Ok(AutoplayReport {
            steps,
            game_over: self.state.game_over,
            winner: self.state.winner,
        })
    }
}
