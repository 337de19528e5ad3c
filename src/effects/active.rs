//! Active effects and their lifecycle.
//!
//! ```text
//! Created -> Active(turns_remaining > 0) -> Expired (removed)
//! ```
//!
//! An effect is created when a support card is played or an `ApplyEffect`
//! modifier fires. At the end of its carrier's turn every effect on the
//! carrier loses one turn and those reaching zero are removed. One-shot
//! effects (duration 1) are consumed earlier, by the action that fires
//! them. Stacking is checked once, at creation.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Catalogue};
use crate::core::{FreelancerId, FreelancerInstance};
use crate::error::Diagnostic;

/// A support card attached to a freelancer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub card: CardId,
    /// Freelancer whose action created the effect.
    pub source: FreelancerId,
    pub turns_remaining: u32,
    /// Ally picked when the card was played, for `TargetedAlly`.
    pub chosen_ally: Option<FreelancerId>,
}

/// Position of an effect on its carrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectRef {
    pub carrier: FreelancerId,
    pub index: usize,
}

/// Lifecycle operations on a carrier's active effects.
pub struct ActiveEffectTracker;

impl ActiveEffectTracker {
    /// Build an effect for a card, starting at the card's duration.
    ///
    /// Cards that are not support cards (or unknown cards) last one turn.
    pub fn create(
        catalogue: &Catalogue,
        card: CardId,
        source: FreelancerId,
        chosen_ally: Option<FreelancerId>,
    ) -> ActiveEffect {
        ActiveEffect {
            card,
            source,
            turns_remaining: catalogue.get(card).map_or(1, |c| c.duration()),
            chosen_ally,
        }
    }

    /// Check the stacking rule for a card on a carrier.
    pub fn can_add(carrier: &FreelancerInstance, card: CardId, catalogue: &Catalogue) -> bool {
        let stacks = catalogue.get(card).is_some_and(|c| c.can_stack());
        stacks || !carrier.has_effect(card)
    }

    /// Attach an effect, enforcing the stacking rule.
    pub fn add(
        carrier: &mut FreelancerInstance,
        effect: ActiveEffect,
        catalogue: &Catalogue,
    ) -> Result<(), Diagnostic> {
        if !Self::can_add(carrier, effect.card, catalogue) {
            tracing::debug!(card = %effect.card, carrier = %carrier.id, "Rejected non-stackable effect");
            return Err(Diagnostic::StackingRejected {
                card: effect.card,
                carrier: carrier.id,
            });
        }
        tracing::debug!(
            card = %effect.card,
            carrier = %carrier.id,
            turns = effect.turns_remaining,
            "Effect created"
        );
        carrier.active_effects.push(effect);
        Ok(())
    }

    /// Decrement every effect on the carrier and drop expired ones.
    ///
    /// Returns the expired effects in their original order.
    pub fn end_turn(carrier: &mut FreelancerInstance) -> Vec<ActiveEffect> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(carrier.active_effects.len());

        for mut effect in carrier.active_effects.drain(..) {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            if effect.turns_remaining == 0 {
                expired.push(effect);
            } else {
                kept.push(effect);
            }
        }
        carrier.active_effects = kept;

        for effect in &expired {
            tracing::debug!(card = %effect.card, carrier = %carrier.id, "Effect expired");
        }
        expired
    }

    /// Remove a consumed effect by index.
    pub fn consume(carrier: &mut FreelancerInstance, index: usize) -> Option<ActiveEffect> {
        if index >= carrier.active_effects.len() {
            return None;
        }
        let effect = carrier.active_effects.remove(index);
        tracing::debug!(card = %effect.card, carrier = %carrier.id, "Effect consumed");
        Some(effect)
    }
}
