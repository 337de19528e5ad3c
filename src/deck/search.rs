//! Deck search: the resolver's view of a side's deck.
//!
//! The resolver only reads decks. It asks the `DeckSearchBridge` for a
//! card of a given kind, and the chosen card is returned as a mutation
//! the match commits afterwards. Searching never shuffles.

use crate::cards::{CardId, CardKind, Catalogue};
use crate::core::Side;

use super::manager::DeckManager;

/// Deck operations the engine needs from whoever owns the piles.
pub trait DeckCollaborator {
    /// A side's draw pile, bottom first.
    fn draw_pile(&self, side: Side) -> &[CardId];

    /// Remove one copy of a card from the draw pile.
    fn remove_from_draw_pile(&mut self, side: Side, card: CardId) -> bool;

    fn add_to_discard(&mut self, side: Side, card: CardId);

    /// Add a card to the hand. Returns false if the hand is full.
    fn add_to_hand(&mut self, side: Side, card: CardId) -> bool;

    /// Draw-pile cards of a kind, top first.
    fn list_filtered(&self, side: Side, catalogue: &Catalogue, kind: CardKind) -> Vec<CardId> {
        self.draw_pile(side)
            .iter()
            .rev()
            .copied()
            .filter(|&card| catalogue.kind_of(card) == Some(kind))
            .collect()
    }
}

impl DeckCollaborator for DeckManager {
    fn draw_pile(&self, side: Side) -> &[CardId] {
        DeckManager::draw_pile(self, side)
    }

    fn remove_from_draw_pile(&mut self, side: Side, card: CardId) -> bool {
        self.remove_draw(side, card)
    }

    fn add_to_discard(&mut self, side: Side, card: CardId) {
        self.push_discard(side, card);
    }

    fn add_to_hand(&mut self, side: Side, card: CardId) -> bool {
        self.push_hand(side, card)
    }
}

/// Picks one card out of the search candidates.
pub trait SearchChooser {
    fn choose(&self, side: Side, candidates: &[CardId]) -> Option<CardId>;
}

/// Takes the topmost candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl SearchChooser for FirstCandidate {
    fn choose(&self, _side: Side, candidates: &[CardId]) -> Option<CardId> {
        candidates.first().copied()
    }
}

impl<F> SearchChooser for F
where
    F: Fn(Side, &[CardId]) -> Option<CardId>,
{
    fn choose(&self, side: Side, candidates: &[CardId]) -> Option<CardId> {
        self(side, candidates)
    }
}

/// Filters a draw pile by card kind and relays the chooser's pick.
pub struct DeckSearchBridge;

impl DeckSearchBridge {
    /// Candidates of `kind`, top first, minus the cards in `exclude`.
    ///
    /// `exclude` holds cards already claimed earlier in the same pass; each
    /// entry removes one copy.
    pub fn candidates(
        deck: &dyn DeckCollaborator,
        catalogue: &Catalogue,
        side: Side,
        kind: CardKind,
        exclude: &[CardId],
    ) -> Vec<CardId> {
        let mut claimed = exclude.to_vec();
        let mut candidates = Vec::new();
        for card in deck.list_filtered(side, catalogue, kind) {
            if let Some(i) = claimed.iter().position(|&c| c == card) {
                claimed.swap_remove(i);
                continue;
            }
            candidates.push(card);
        }
        candidates
    }

    /// Search a side's draw pile for a card of `kind`.
    ///
    /// A pick outside the candidate list is ignored, so the result is
    /// always of the requested kind.
    pub fn search(
        deck: &dyn DeckCollaborator,
        catalogue: &Catalogue,
        side: Side,
        kind: CardKind,
        chooser: &dyn SearchChooser,
        exclude: &[CardId],
    ) -> Option<CardId> {
        let candidates = Self::candidates(deck, catalogue, side, kind, exclude);
        if candidates.is_empty() {
            return None;
        }
        let pick = chooser.choose(side, &candidates)?;
        if candidates.contains(&pick) {
            Some(pick)
        } else {
            tracing::warn!(%side, card = %pick, "Search chooser picked a non-candidate");
            None
        }
    }
}
