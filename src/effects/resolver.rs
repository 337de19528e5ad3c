//! Modifier resolution - folding active effects into an action.
//!
//! The `ModifierResolver` is pure with respect to the match: it reads the
//! state, the catalogue, the board and the decks, and returns a
//! `ResolvedEffects` describing everything the action changes. The
//! `MatchContext` commits it afterwards in one step.
//!
//! ## Pass
//!
//! 1. Scope: every active effect on the source and on the target, plus the
//!    freshly played card if the source does not carry it yet.
//! 2. Gate: each effect's card conditions are evaluated with the carrier
//!    as subject. Passive conditions are collected for status icons.
//! 3. Collect the modifiers whose `trigger_on` matches the action and
//!    stable-sort them by priority.
//! 4. Fold them into the `ResolutionContext`.
//! 5. Run complex effects of eligible cards.
//!
//! Effects created during a pass do not fire until a later action.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::active::{ActiveEffect, ActiveEffectTracker, EffectRef};
use super::context::ResolutionContext;
use super::modifier::{Modifier, ModifierLogic, StatKind};
use super::targeting::TargetResolver;
use crate::board::Board;
use crate::cards::{CardId, Catalogue, SupportCard};
use crate::conditions::{ConditionContext, ConditionEvaluator, PassiveStatus};
use crate::core::{
    ActionKind, AuxParameters, EngineConfig, FreelancerId, FreelancerInstance, MatchState,
    SearchDestination, Side,
};
use crate::deck::{DeckCollaborator, DeckSearchBridge, SearchChooser};
use crate::error::Diagnostic;

/// One action to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub kind: ActionKind,
    pub source: FreelancerId,
    pub target: Option<FreelancerId>,
    pub aux: AuxParameters,
}

impl ResolveRequest {
    #[must_use]
    pub fn new(kind: ActionKind, source: FreelancerId, target: Option<FreelancerId>) -> Self {
        Self {
            kind,
            source,
            target,
            aux: AuxParameters::default(),
        }
    }

    /// Attach auxiliary parameters (builder pattern).
    #[must_use]
    pub fn with_aux(mut self, aux: AuxParameters) -> Self {
        self.aux = aux;
        self
    }
}

/// A modifier that fired, in application order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedModifier {
    pub card: CardId,
    pub carrier: FreelancerId,
    pub logic: ModifierLogic,
    pub stat: StatKind,
    pub priority: i32,
}

/// An effect to attach at commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub carrier: FreelancerId,
    pub effect: ActiveEffect,
}

/// A change to a side's piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckMutation {
    /// Take a card out of the draw pile.
    Take {
        side: Side,
        card: CardId,
        destination: SearchDestination,
    },
}

/// Passive conditions of one in-scope card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveReport {
    pub carrier: FreelancerId,
    pub card: CardId,
    pub icon: Option<String>,
    pub statuses: SmallVec<[PassiveStatus; 2]>,
}

impl PassiveReport {
    /// Whether the status icon should be shown.
    #[must_use]
    pub fn icon_visible(&self) -> bool {
        self.icon.is_some() && self.statuses.iter().any(|s| s.active)
    }
}

/// Everything an action changes, ready to commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEffects {
    pub action: ActionKind,
    pub source: FreelancerId,
    pub target: Option<FreelancerId>,
    pub context: ResolutionContext,
    pub applied: Vec<AppliedModifier>,
    pub new_effects: Vec<PendingEffect>,
    pub deck_mutations: Vec<DeckMutation>,
    /// One-shot effects used up by this action.
    pub consumed: Vec<EffectRef>,
    pub passive: Vec<PassiveReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedEffects {
    fn new(request: &ResolveRequest, context: ResolutionContext) -> Self {
        Self {
            action: request.kind,
            source: request.source,
            target: request.target,
            context,
            applied: Vec::new(),
            new_effects: Vec::new(),
            deck_mutations: Vec::new(),
            consumed: Vec::new(),
            passive: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Final damage value.
    #[must_use]
    pub fn damage(&self) -> i64 {
        self.context.get(StatKind::Damage)
    }

    /// Final roll, after remaps.
    #[must_use]
    pub fn roll(&self) -> Option<i64> {
        self.context.roll
    }

    /// Whether no modifier or complex effect fired.
    #[must_use]
    pub fn is_unmodified(&self) -> bool {
        self.applied.is_empty() && self.context.changed().is_empty() && self.context.roll == self.context.raw_roll
    }
}

/// An effect in scope of the pass.
struct Scoped<'c> {
    carrier: &'c FreelancerInstance,
    card: CardId,
    support: &'c SupportCard,
    chosen_ally: Option<FreelancerId>,
    /// `None` for a played card not yet attached.
    slot: Option<EffectRef>,
    one_shot: bool,
}

struct Candidate<'c> {
    scope: usize,
    modifier: &'c Modifier,
}

/// Resolves one action against the active effects in scope.
pub struct ModifierResolver<'a> {
    state: &'a MatchState,
    catalogue: &'a Catalogue,
    board: &'a dyn Board,
    deck: &'a dyn DeckCollaborator,
    chooser: &'a dyn SearchChooser,
    config: &'a EngineConfig,
}

impl<'a> ModifierResolver<'a> {
    pub fn new(
        state: &'a MatchState,
        catalogue: &'a Catalogue,
        board: &'a dyn Board,
        deck: &'a dyn DeckCollaborator,
        chooser: &'a dyn SearchChooser,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            state,
            catalogue,
            board,
            deck,
            chooser,
            config,
        }
    }

    /// Resolve an action.
    ///
    /// An unknown source yields an unmodified result with a diagnostic.
    pub fn resolve(&self, request: &ResolveRequest) -> ResolvedEffects {
        let Some(source) = self.state.get(request.source) else {
            tracing::warn!(source = %request.source, "Resolving action for unknown freelancer");
            let mut out = ResolvedEffects::new(request, ResolutionContext::default());
            out.diagnostics.push(Diagnostic::MissingFreelancer(request.source));
            return out;
        };
        let target = request.target.and_then(|id| self.state.get(id));

        let context = ResolutionContext::seed(source, target, request.aux.raw_roll);
        let mut out = ResolvedEffects::new(request, context);
        if let (Some(id), None) = (request.target, target) {
            out.diagnostics.push(Diagnostic::MissingFreelancer(id));
        }

        let scope = self.collect_scope(source, target, request, &mut out);

        // Gate by conditions; record passive statuses.
        let mut eligible = vec![false; scope.len()];
        for (i, scoped) in scope.iter().enumerate() {
            let other = self.other_party(scoped.carrier.id, request);
            let ctx = ConditionContext::new(scoped.carrier.id, other, self.state, self.board);
            let report = ConditionEvaluator::evaluate(&scoped.support.conditions, &ctx);
            if !report.passive.is_empty() {
                out.passive.push(PassiveReport {
                    carrier: scoped.carrier.id,
                    card: scoped.card,
                    icon: scoped.support.custom_status_icon.clone(),
                    statuses: report.passive,
                });
            }
            eligible[i] = report.eligible;
        }

        let kind = request.kind;
        let mut candidates: Vec<Candidate> = scope
            .iter()
            .enumerate()
            .filter(|&(i, _)| eligible[i])
            .flat_map(|(i, scoped)| {
                scoped
                    .support
                    .modifiers
                    .iter()
                    .filter(move |m| m.trigger_on.triggers(kind))
                    .map(move |modifier| Candidate { scope: i, modifier })
            })
            .collect();
        candidates.sort_by_key(|c| c.modifier.priority);

        for candidate in &candidates {
            let scoped = &scope[candidate.scope];
            if self.apply(candidate.modifier, scoped, request, &mut out) {
                out.applied.push(AppliedModifier {
                    card: scoped.card,
                    carrier: scoped.carrier.id,
                    logic: candidate.modifier.logic,
                    stat: candidate.modifier.stat,
                    priority: candidate.modifier.priority,
                });
                if candidate.modifier.consumed_by.triggers(request.kind) {
                    Self::mark_consumed(scoped, &mut out);
                }
            }
        }

        for (i, scoped) in scope.iter().enumerate() {
            if !eligible[i] {
                continue;
            }
            let consumes = scoped.support.consumed_by().triggers(request.kind);
            for complex in &scoped.support.complex_effects {
                if complex.apply(request.kind, scoped.carrier, source, target, self.state, &mut out.context) {
                    tracing::debug!(card = %scoped.card, effect = ?complex, "Complex effect applied");
                    if consumes {
                        Self::mark_consumed(scoped, &mut out);
                    }
                }
            }
        }

        tracing::debug!(
            action = ?request.kind,
            source = %request.source,
            applied = out.applied.len(),
            new_effects = out.new_effects.len(),
            "Resolved action"
        );
        out
    }

    fn collect_scope(
        &self,
        source: &'a FreelancerInstance,
        target: Option<&'a FreelancerInstance>,
        request: &ResolveRequest,
        out: &mut ResolvedEffects,
    ) -> Vec<Scoped<'a>> {
        let mut scope = Vec::new();
        let carriers = std::iter::once(source).chain(target.filter(|t| t.id != source.id));

        for carrier in carriers {
            for (index, effect) in carrier.active_effects.iter().enumerate() {
                let Some(card) = self.catalogue.get(effect.card) else {
                    tracing::warn!(card = %effect.card, carrier = %carrier.id, "Active effect for an unknown card");
                    out.diagnostics.push(Diagnostic::MissingCard(effect.card));
                    continue;
                };
                // Energy cards attached as effects carry no rules.
                let Some(support) = card.as_support() else {
                    continue;
                };
                scope.push(Scoped {
                    carrier,
                    card: effect.card,
                    support,
                    chosen_ally: effect.chosen_ally,
                    slot: Some(EffectRef {
                        carrier: carrier.id,
                        index,
                    }),
                    one_shot: support.is_one_shot(),
                });
            }
        }

        if let Some(card) = request.aux.card {
            if !source.has_effect(card) {
                if let Some(support) = self.catalogue.support(card) {
                    scope.push(Scoped {
                        carrier: source,
                        card,
                        support,
                        chosen_ally: request.aux.chosen_ally,
                        slot: None,
                        one_shot: support.is_one_shot(),
                    });
                }
            }
        }
        scope
    }

    /// The party a carrier's conditions and targets are read against.
    fn other_party(&self, carrier: FreelancerId, request: &ResolveRequest) -> Option<FreelancerId> {
        if carrier == request.source {
            request.target
        } else {
            Some(request.source)
        }
    }

    fn mark_consumed(scoped: &Scoped, out: &mut ResolvedEffects) {
        if let Some(slot) = scoped.slot {
            if scoped.one_shot && !out.consumed.contains(&slot) {
                out.consumed.push(slot);
            }
        }
    }

    /// Apply one modifier. Returns true when it fired.
    fn apply(&self, modifier: &Modifier, scoped: &Scoped, request: &ResolveRequest, out: &mut ResolvedEffects) -> bool {
        match modifier.logic {
            ModifierLogic::Additive => {
                out.context.add(modifier.stat, modifier.value);
                true
            }

            ModifierLogic::ResultMap => match out.context.roll {
                Some(roll) if modifier.remaps(roll) => {
                    out.context.roll = Some(modifier.new_result);
                    true
                }
                _ => false,
            },

            ModifierLogic::SetDamage => {
                out.context.set(StatKind::Damage, modifier.value);
                true
            }

            ModifierLogic::ApplyEffect => self.apply_effect(modifier, scoped, request, out),

            ModifierLogic::SearchDeck => self.search_deck(modifier, scoped, request, out),
        }
    }

    fn apply_effect(&self, modifier: &Modifier, scoped: &Scoped, request: &ResolveRequest, out: &mut ResolvedEffects) -> bool {
        let Some(card) = modifier.effect_to_apply else {
            tracing::warn!(card = %scoped.card, "Apply-effect modifier without an effect");
            out.diagnostics.push(Diagnostic::NothingToApply(scoped.card));
            return false;
        };

        let origin = scoped.carrier.id;
        let chosen_ally = scoped.chosen_ally.or(request.aux.chosen_ally);
        let targets = TargetResolver::new(self.state, self.board, self.config.area_radius).resolve(
            modifier.target,
            origin,
            self.other_party(origin, request),
            chosen_ally,
        );

        let stacks = self.catalogue.get(card).is_some_and(|c| c.can_stack());
        let mut created = false;
        for id in targets {
            let Some(carrier) = self.state.get(id) else {
                continue;
            };
            let pending = out.new_effects.iter().any(|p| p.carrier == id && p.effect.card == card);
            if !stacks && (pending || !ActiveEffectTracker::can_add(carrier, card, self.catalogue)) {
                out.diagnostics.push(Diagnostic::StackingRejected { card, carrier: id });
                continue;
            }
            out.new_effects.push(PendingEffect {
                carrier: id,
                effect: ActiveEffectTracker::create(self.catalogue, card, origin, chosen_ally),
            });
            created = true;
        }
        created
    }

    fn search_deck(&self, modifier: &Modifier, scoped: &Scoped, request: &ResolveRequest, out: &mut ResolvedEffects) -> bool {
        let Some(kind) = modifier.card_kind_to_search else {
            return false;
        };
        let side = scoped.carrier.side;
        let claimed: Vec<CardId> = out
            .deck_mutations
            .iter()
            .filter_map(|m| match m {
                DeckMutation::Take { side: s, card, .. } if *s == side => Some(*card),
                _ => None,
            })
            .collect();

        // A pick named with the request wins if it is a valid candidate.
        let preferred = request.aux.search_choice;
        let chooser = |s: Side, candidates: &[CardId]| match preferred {
            Some(card) if candidates.contains(&card) => Some(card),
            _ => self.chooser.choose(s, candidates),
        };

        match DeckSearchBridge::search(self.deck, self.catalogue, side, kind, &chooser, &claimed) {
            Some(card) => {
                out.deck_mutations.push(DeckMutation::Take {
                    side,
                    card,
                    destination: self.config.search_destination,
                });
                true
            }
            None => {
                tracing::debug!(%side, ?kind, "Deck search found nothing");
                out.diagnostics.push(Diagnostic::SearchFoundNothing(side));
                false
            }
        }
    }
}
