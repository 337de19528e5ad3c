//! The per-match context.
//!
//! `MatchContext` owns everything one match needs: the shared catalogue,
//! the match state, both decks, the board and the configuration. Every
//! mutating entry point takes `&mut self`, so one action is resolved and
//! committed before the next can start.
//!
//! ## Example
//!
//! ```
//! use freelancer_engine::board::GridBoard;
//! use freelancer_engine::cards::{Card, CardId, CardKind, CatalogueBuilder, SupportCard};
//! use freelancer_engine::core::{ActionKind, AuxParameters, EngineConfig, FreelancerStats, Side};
//! use freelancer_engine::effects::{Modifier, StatKind};
//! use freelancer_engine::engine::MatchContext;
//!
//! let mut builder = CatalogueBuilder::new();
//! let unit = builder.register(Card::unit(CardId::new(0), "Vex", FreelancerStats::default()));
//! let focus = builder.register(Card::support(
//!     CardId::new(1),
//!     "Focus",
//!     CardKind::Skill,
//!     SupportCard::new().with_modifier(Modifier::additive(StatKind::AttackDice, 1)),
//! ));
//!
//! let mut ctx = MatchContext::new(builder.build(), GridBoard::new(8, 8), EngineConfig::default());
//! let vex = ctx.spawn(Side::One, unit, None).unwrap();
//!
//! ctx.on_card_played(vex, focus, None).unwrap();
//! let resolved = ctx.resolve_action(ActionKind::UseCard, vex, None, AuxParameters::default());
//! assert_eq!(resolved.context.delta(StatKind::AttackDice), 1);
//!
//! // One-shot effects are gone once used.
//! assert!(ctx.state().get(vex).unwrap().active_effects.is_empty());
//! ```

use std::sync::Arc;

use crate::board::Board;
use crate::cards::{CardId, CardKind, Catalogue};
use crate::core::{
    ActionKind, AuxParameters, EngineConfig, FreelancerId, GameRng, MatchState, RollKind,
    SearchDestination, Side, TileIndex,
};
use crate::deck::{DeckCollaborator, DeckManager, DeckProfile, FirstCandidate, SearchChooser};
use crate::effects::{
    ActiveEffect, ActiveEffectTracker, DeckMutation, ModifierResolver, ResolveRequest,
    ResolvedEffects, StatKind,
};
use crate::error::Diagnostic;

/// Salt separating the dice stream from the shuffle streams.
const DICE_SALT: u64 = 0xD1CE;

/// Faces on a die.
pub const DIE_FACES: i64 = 6;

/// Everything one match needs.
pub struct MatchContext<B: Board> {
    catalogue: Arc<Catalogue>,
    state: MatchState,
    decks: DeckManager,
    board: B,
    config: EngineConfig,
    chooser: Box<dyn SearchChooser>,
    dice: GameRng,
}

impl<B: Board> MatchContext<B> {
    /// Create a match with empty decks and no freelancers.
    pub fn new(catalogue: Arc<Catalogue>, board: B, config: EngineConfig) -> Self {
        Self {
            decks: DeckManager::new(&config),
            dice: GameRng::new(config.shuffle_seed ^ DICE_SALT),
            catalogue,
            state: MatchState::new(),
            board,
            config,
            chooser: Box::new(FirstCandidate),
        }
    }

    /// Replace the deck-search chooser (builder pattern).
    #[must_use]
    pub fn with_chooser(mut self, chooser: impl SearchChooser + 'static) -> Self {
        self.chooser = Box::new(chooser);
        self
    }

    // === Setup ===

    /// Spawn a freelancer from a unit card, optionally placing it.
    pub fn spawn(&mut self, side: Side, unit: CardId, tile: Option<TileIndex>) -> Result<FreelancerId, Diagnostic> {
        let card = self.catalogue.get(unit).ok_or(Diagnostic::MissingCard(unit))?;
        let stats = card.as_unit().ok_or(Diagnostic::WrongCardKind(unit))?.clone();

        let id = self.state.spawn(side, unit, stats);
        if let Some(tile) = tile {
            self.board.place(id, tile);
        }
        tracing::debug!(%side, freelancer = %id, card = %unit, "Spawned freelancer");
        Ok(id)
    }

    /// Build a side's deck. A missing profile leaves it empty.
    pub fn build_deck(&mut self, side: Side, profile: Option<&DeckProfile>) -> Vec<Diagnostic> {
        self.decks.build_deck(side, profile, &self.catalogue)
    }

    /// Deal the configured starting hand to both sides.
    pub fn deal_starting_hands(&mut self) {
        self.decks.deal_starting_hands(self.config.starting_hand_size);
    }

    // === Lifecycle hooks ===

    /// Seed the active effect of a card played by a freelancer.
    ///
    /// An explicit target on the player's own side is remembered as the
    /// chosen ally for `TargetedAlly` modifiers.
    pub fn on_card_played(
        &mut self,
        id: FreelancerId,
        card: CardId,
        explicit_target: Option<FreelancerId>,
    ) -> Result<(), Diagnostic> {
        let kind = self.catalogue.kind_of(card).ok_or(Diagnostic::MissingCard(card))?;
        let side = self.state.get(id).ok_or(Diagnostic::MissingFreelancer(id))?.side;

        let chosen_ally = explicit_target.filter(|&t| t != id && self.state.get(t).is_some_and(|f| f.side == side));
        let effect = ActiveEffectTracker::create(&self.catalogue, card, id, chosen_ally);

        let carrier = self.state.get_mut(id).ok_or(Diagnostic::MissingFreelancer(id))?;
        ActiveEffectTracker::add(carrier, effect, &self.catalogue)?;
        if kind == CardKind::Skill {
            carrier.used_skill = true;
        }
        Ok(())
    }

    /// Resolve an action and commit its effects.
    pub fn resolve_action(
        &mut self,
        kind: ActionKind,
        source: FreelancerId,
        target: Option<FreelancerId>,
        aux: AuxParameters,
    ) -> ResolvedEffects {
        let request = ResolveRequest::new(kind, source, target).with_aux(aux);
        let mut resolved = self.resolve(&request);
        self.commit(&request, &mut resolved);
        resolved
    }

    /// Resolve a move and commit it only if the destination is in range.
    ///
    /// Range is checked against the resolved `Movement`. A refused move
    /// commits nothing: the result carries `Diagnostic::OutOfRange` and no
    /// pending effects, consumptions or deck mutations.
    pub fn resolve_move(&mut self, id: FreelancerId, destination: TileIndex) -> ResolvedEffects {
        let aux = AuxParameters::default().with_destination(destination);
        let request = ResolveRequest::new(ActionKind::Move, id, None).with_aux(aux);
        let mut resolved = self.resolve(&request);

        let movement = resolved.context.get(StatKind::Movement);
        if let Err(diagnostic) = self.check_range(id, destination, movement) {
            tracing::debug!(freelancer = %id, tile = %destination, movement, "Move refused");
            resolved.new_effects.clear();
            resolved.consumed.clear();
            resolved.deck_mutations.clear();
            resolved.diagnostics.push(diagnostic);
            return resolved;
        }

        self.commit(&request, &mut resolved);
        self.board.place(id, destination);
        resolved
    }

    fn resolve(&self, request: &ResolveRequest) -> ResolvedEffects {
        ModifierResolver::new(
            &self.state,
            &self.catalogue,
            &self.board,
            &self.decks,
            self.chooser.as_ref(),
            &self.config,
        )
        .resolve(request)
    }

    /// Decrement the active effects of one freelancer.
    ///
    /// Returns the effects that expired.
    pub fn on_turn_ended(&mut self, id: FreelancerId) -> Vec<ActiveEffect> {
        match self.state.get_mut(id) {
            Some(f) => ActiveEffectTracker::end_turn(f),
            None => {
                tracing::warn!(freelancer = %id, "Turn ended for unknown freelancer");
                Vec::new()
            }
        }
    }

    /// End the current side's turn.
    ///
    /// Every freelancer of the ending side gets `on_turn_ended` and its
    /// action charges back, then the turn passes.
    pub fn end_turn(&mut self) -> Vec<(FreelancerId, ActiveEffect)> {
        let side = self.state.current_side;
        let mut expired = Vec::new();
        for id in self.state.turn_order(side).to_vec() {
            expired.extend(self.on_turn_ended(id).into_iter().map(|e| (id, e)));
            if let Some(f) = self.state.get_mut(id) {
                f.action_charges = 1;
            }
        }
        self.state.advance_turn();
        tracing::debug!(
            ended = %side,
            round = self.state.round,
            expired = expired.len(),
            "Turn ended"
        );
        expired
    }

    // === Match helpers ===

    /// Deal damage. Returns true if the freelancer was eliminated.
    pub fn apply_damage(&mut self, id: FreelancerId, amount: i64) -> bool {
        let Some(f) = self.state.get_mut(id) else {
            tracing::warn!(freelancer = %id, "Damage to unknown freelancer");
            return false;
        };
        if !f.take_damage(amount) {
            return false;
        }
        let tile = self.board.position(id);
        self.state.record_elimination(id, tile);
        tracing::debug!(freelancer = %id, "Freelancer eliminated");
        true
    }

    /// Attach an energy card to a freelancer.
    pub fn equip_energy(&mut self, id: FreelancerId, card: CardId) -> Result<(), Diagnostic> {
        let kind = self.catalogue.kind_of(card).ok_or(Diagnostic::MissingCard(card))?;
        if !kind.is_energy() {
            return Err(Diagnostic::WrongCardKind(card));
        }
        let f = self.state.get_mut(id).ok_or(Diagnostic::MissingFreelancer(id))?;
        f.equipped_energy.push(card);
        Ok(())
    }

    /// Move a freelancer if the destination is within `movement`.
    pub fn move_freelancer(&mut self, id: FreelancerId, tile: TileIndex, movement: i64) -> Result<(), Diagnostic> {
        self.check_range(id, tile, movement)?;
        self.board.place(id, tile);
        Ok(())
    }

    fn check_range(&self, id: FreelancerId, tile: TileIndex, movement: i64) -> Result<(), Diagnostic> {
        match self.board.position(id) {
            Some(from) if i64::from(self.board.distance(from, tile)) > movement => {
                Err(Diagnostic::OutOfRange { freelancer: id, tile })
            }
            _ => Ok(()),
        }
    }

    /// Roll one die.
    pub fn roll_die(&mut self) -> i64 {
        self.dice.gen_range(1..DIE_FACES + 1)
    }

    // === Accessors ===

    #[must_use]
    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    #[must_use]
    pub fn decks(&self) -> &DeckManager {
        &self.decks
    }

    pub fn decks_mut(&mut self) -> &mut DeckManager {
        &mut self.decks
    }

    #[must_use]
    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Commit ===

    /// Apply a resolution to the match.
    ///
    /// Consumed effects go first, by descending index, so the recorded
    /// indices stay valid.
    fn commit(&mut self, request: &ResolveRequest, resolved: &mut ResolvedEffects) {
        let mut consumed = resolved.consumed.clone();
        consumed.sort_by(|a, b| b.index.cmp(&a.index));
        for slot in consumed {
            if let Some(carrier) = self.state.get_mut(slot.carrier) {
                ActiveEffectTracker::consume(carrier, slot.index);
            }
        }

        for pending in &resolved.new_effects {
            let Some(carrier) = self.state.get_mut(pending.carrier) else {
                resolved.diagnostics.push(Diagnostic::MissingFreelancer(pending.carrier));
                continue;
            };
            if let Err(diagnostic) = ActiveEffectTracker::add(carrier, pending.effect.clone(), &self.catalogue) {
                resolved.diagnostics.push(diagnostic);
            }
        }

        for mutation in &resolved.deck_mutations {
            let DeckMutation::Take { side, card, destination } = *mutation;
            if !self.decks.remove_from_draw_pile(side, card) {
                continue;
            }
            let to_hand = destination == SearchDestination::Hand && self.decks.add_to_hand(side, card);
            if !to_hand {
                self.decks.add_to_discard(side, card);
            }
        }

        let charges = resolved.context.delta(StatKind::ActionCharges);
        let draws = resolved.context.get(StatKind::CardDraw).max(0) as usize;
        let Some(source) = self.state.get_mut(request.source) else {
            return;
        };

        if request.kind == ActionKind::Roll && request.aux.roll_kind == RollKind::PreFire {
            source.stored_dice_result = resolved.context.roll;
        } else if resolved.context.used_stored_roll {
            source.stored_dice_result = None;
        }

        source.action_charges += charges;
        match request.kind {
            ActionKind::Move => source.has_moved = true,
            ActionKind::Attack | ActionKind::UseCard => source.has_acted = true,
            ActionKind::Roll | ActionKind::EndTurn => {}
        }
        let side = source.side;

        if draws > 0 {
            let drawn = self.decks.draw_many(side, draws);
            if drawn.len() < draws {
                resolved.diagnostics.push(Diagnostic::EmptyDrawPile(side));
            }
        }

        if request.kind != ActionKind::EndTurn {
            self.state.record_action(request.kind, request.source, request.target);
        }
    }
}
