//! Complex effects: card logic that does not fit a flat modifier.
//!
//! Each variant reads the carrier and the action's parties and folds its
//! contribution into the `ResolutionContext`. They run after every
//! declarative modifier of the pass, so they see the final stat values.
//!
//! Offensive variants (`ExecuteBelowHp`, `UseStoredRoll`, `Vengeance`) only
//! fire when the carrier is the acting freelancer. `MirrorDefense` fires
//! from either side of the action.

use serde::{Deserialize, Serialize};

use super::context::ResolutionContext;
use super::modifier::StatKind;
use crate::core::{ActionKind, ActionMask, FreelancerInstance, MatchState};

/// Closed set of complex effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ComplexEffect {
    /// Extra damage against a target at or below `threshold` HP.
    ExecuteBelowHp { threshold: i64, bonus: i64 },
    /// Defense dice rise to match the attack dice.
    MirrorDefense,
    /// Replace the roll with the source's stored pre-fire roll.
    UseStoredRoll,
    /// Extra damage per ally of the source lost this round.
    Vengeance { per_death: i64 },
}

impl ComplexEffect {
    /// Actions the effect reacts to.
    #[must_use]
    pub fn triggers(&self) -> ActionMask {
        match self {
            ComplexEffect::ExecuteBelowHp { .. } | ComplexEffect::Vengeance { .. } => ActionMask::ATTACK,
            ComplexEffect::MirrorDefense => ActionMask::ATTACK.union(ActionMask::ROLL),
            ComplexEffect::UseStoredRoll => ActionMask::ROLL.union(ActionMask::ATTACK),
        }
    }

    /// Whether the effect only works for the acting freelancer.
    #[must_use]
    pub fn is_offensive(&self) -> bool {
        !matches!(self, ComplexEffect::MirrorDefense)
    }

    /// Fold the effect into the context.
    ///
    /// Returns true when it changed anything.
    pub fn apply(
        &self,
        kind: ActionKind,
        carrier: &FreelancerInstance,
        source: &FreelancerInstance,
        target: Option<&FreelancerInstance>,
        state: &MatchState,
        ctx: &mut ResolutionContext,
    ) -> bool {
        if !self.triggers().triggers(kind) {
            return false;
        }
        if self.is_offensive() && carrier.id != source.id {
            return false;
        }

        match self {
            ComplexEffect::ExecuteBelowHp { threshold, bonus } => match target {
                Some(t) if t.alive && t.current_hp <= *threshold => {
                    ctx.add(StatKind::Damage, *bonus);
                    true
                }
                _ => false,
            },

            ComplexEffect::MirrorDefense => {
                let attack = ctx.get(StatKind::AttackDice);
                if ctx.get(StatKind::DefenseDice) < attack {
                    ctx.set(StatKind::DefenseDice, attack);
                    true
                } else {
                    false
                }
            }

            ComplexEffect::UseStoredRoll => match carrier.stored_dice_result {
                Some(stored) => {
                    ctx.roll = Some(stored);
                    ctx.used_stored_roll = true;
                    true
                }
                None => false,
            },

            ComplexEffect::Vengeance { per_death } => {
                let deaths = state.deaths_this_round(carrier.side).count() as i64;
                if deaths == 0 {
                    return false;
                }
                ctx.add(StatKind::Damage, per_death * deaths);
                true
            }
        }
    }
}
