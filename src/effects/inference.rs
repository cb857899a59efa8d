//! Best-effort effect inference from ability text.
//!
//! Cards without a registered script still need to do something when
//! played. This module recognises a deliberately small vocabulary:
//!
//! - `draw N card(s)` / `draw a card` - the controller draws
//! - `deal N damage to ... unit` - damage to a target chosen at play time
//!
//! Matching is case-insensitive and only starts at word boundaries.
//! Anything else is left to the caller, which resolves it as a log line.

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_till};
use nom::character::complete::{digit1, multispace1};
use nom::combinator::{map, map_res, value, verify};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

use crate::core::{InstanceId, PlayerId};
use crate::effects::Effect;

/// An effect recognised in ability text, before targets are known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferredEffect {
    /// The controller draws this many cards.
    Draw(u32),
    /// This much damage to a unit chosen when the card is played.
    DamageTargetUnit(i32),
}

impl InferredEffect {
    /// Does the card need a target unit to be played?
    #[must_use]
    pub fn requires_target(self) -> bool {
        matches!(self, InferredEffect::DamageTargetUnit(_))
    }

    /// Bind the effect to the actual controller and target.
    ///
    /// Returns `None` when a target is required but missing.
    #[must_use]
    pub fn bind(self, controller: PlayerId, target: Option<InstanceId>) -> Option<Effect> {
        match self {
            InferredEffect::Draw(count) => Some(Effect::draw(controller, count)),
            InferredEffect::DamageTargetUnit(amount) => {
                target.map(|unit| Effect::damage_unit(unit, amount))
            }
        }
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn card_count(input: &str) -> IResult<&str, u32> {
    alt((number, value(1, tag_no_case("a"))))(input)
}

/// `draw 2 cards`, `draw a card`
fn draw_clause(input: &str) -> IResult<&str, InferredEffect> {
    map(
        preceded(
            terminated(tag_no_case("draw"), multispace1),
            terminated(card_count, tuple((multispace1, tag_no_case("card")))),
        ),
        InferredEffect::Draw,
    )(input)
}

/// `deal 3 damage to target enemy unit`
fn damage_clause(input: &str) -> IResult<&str, InferredEffect> {
    let (rest, amount) = preceded(
        terminated(tag_no_case("deal"), multispace1),
        terminated(number, tuple((multispace1, tag_no_case("damage"), multispace1, tag_no_case("to")))),
    )(input)?;
    let (rest, _) = verify(take_till(|c| c == '.' || c == ';'), |clause: &str| {
        clause.to_lowercase().contains("unit")
    })(rest)?;
    let amount = i32::try_from(amount).unwrap_or(i32::MAX);
    Ok((rest, InferredEffect::DamageTargetUnit(amount)))
}

fn clause(input: &str) -> IResult<&str, InferredEffect> {
    alt((draw_clause, damage_clause))(input)
}

/// Every recognised clause in `text`, in order of appearance.
///
/// ```
/// use rust_tcg::effects::{infer_effects, InferredEffect};
///
/// assert_eq!(infer_effects("Draw 2 cards."), vec![InferredEffect::Draw(2)]);
/// assert_eq!(
///     infer_effects("Deal 3 damage to target enemy Unit."),
///     vec![InferredEffect::DamageTargetUnit(3)],
/// );
/// assert!(infer_effects("Rest 1 enemy unit.").is_empty());
/// ```
#[must_use]
pub fn infer_effects(text: &str) -> Vec<InferredEffect> {
    let mut found = Vec::new();
    let mut at_boundary = true;
    let mut skip_to = 0;
    for (i, c) in text.char_indices() {
        if i >= skip_to && at_boundary {
            if let Ok((rest, effect)) = clause(&text[i..]) {
                found.push(effect);
                skip_to = text.len() - rest.len();
            }
        }
        at_boundary = !c.is_alphanumeric();
    }
    found
}
