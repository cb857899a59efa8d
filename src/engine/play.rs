//! Playing cards from hand.

use super::Engine;
use crate::cards::CardCategory;
use crate::core::{GameAction, InstanceId, LogCategory, PlayOptions, PlayerId};
use crate::effects::{EffectList, ScriptContext};
use crate::error::{EngineError, Result};
use crate::rules::{check_play, pay, PlayPlan};
use crate::zones::{Zone, ZonePosition};

impl Engine {
    /// Play `card` from `player`'s hand.
    ///
    /// Units, pilots and bases are deployed directly; commands go to the
    /// discard and put their effects on the stack. On success the
    /// opponent receives priority.
    pub fn play_card(&mut self, player: PlayerId, card: InstanceId, options: PlayOptions) -> Result<()> {
        let plan = check_play(&self.state, &self.scripts, player, card, options)?;
        let queued = self.prepare_effects(&plan)?;

        pay(&mut self.state, &plan.payment)?;
        let name = self.state.card_name(card);
        match plan.category {
            CardCategory::Command => {
                self.state.move_instance(card, Zone::Discard, ZonePosition::Top)?;
                self.state.log(LogCategory::Play, format!("{name} is played"));
            }
            CardCategory::Unit => {
                self.state.move_instance(card, Zone::BattleArea, ZonePosition::Top)?;
                self.state.log(LogCategory::Play, format!("{name} is deployed"));
            }
            CardCategory::Pilot => self.deploy_pilot(&plan, &name)?,
            CardCategory::Base => {
                if let Some(old) = self.state.zones(player).base {
                    let old_name = self.state.card_name(old);
                    self.state.discard_from_play(old)?;
                    self.state.log(LogCategory::Play, format!("{old_name} is replaced"));
                }
                self.state.move_instance(card, Zone::Base, ZonePosition::Top)?;
                self.state.log(LogCategory::Play, format!("{name} is deployed as base"));
            }
            // check_play never approves resource cards
            CardCategory::Resource => {}
        }

        if let Some(effects) = queued {
            self.push_stack_item(player, Some(card), name, effects);
        }

        self.state.record_action(player, GameAction::PlayCard { card, options });
        if let Some(window) = self.state.priority.as_mut() {
            window.respond_to(player);
        }
        self.sweep()
    }

    /// Effects the play will queue, computed before anything is committed.
    ///
    /// Commands always queue something. Other cards queue only when a
    /// script is registered for them.
    fn prepare_effects(&self, plan: &PlayPlan) -> Result<Option<EffectList>> {
        let definition = &self.state.get(plan.card)?.definition;
        let scripted = self.scripts.contains(&definition.id);
        if plan.category != CardCategory::Command && !scripted {
            return Ok(None);
        }
        let ctx = ScriptContext {
            state: &self.state,
            controller: plan.player,
            opponent: plan.player.opponent(),
            source: plan.card,
            target: plan.target,
        };
        self.scripts.prepare(definition, &ctx).map(Some)
    }

    fn deploy_pilot(&mut self, plan: &PlayPlan, name: &str) -> Result<()> {
        let Some(unit) = plan.attach_to else {
            return Err(EngineError::MissingTarget(name.to_string()));
        };
        self.state.move_instance(plan.card, Zone::BattleArea, ZonePosition::Top)?;
        self.state.attach_pilot(plan.card, unit)?;
        let unit_name = self.state.card_name(unit);
        self.state.log(LogCategory::Play, format!("{name} pilots {unit_name}"));

        let linked = match (self.state.instance(unit), self.state.instance(plan.card)) {
            (Some(u), Some(p)) => u.definition.links_with(&p.definition),
            _ => false,
        };
        if linked {
            if let Some(u) = self.state.instance_mut(unit) {
                u.link_active = true;
            }
            self.state.log(LogCategory::Play, format!("{unit_name} is linked"));
        }
        Ok(())
    }
}
