//! Per-side deck manager: draw pile, hand and discard pile.
//!
//! The top of the draw pile is the end of its `Vec`. Shuffles use each
//! side's own `GameRng` stream derived from `EngineConfig::shuffle_seed`,
//! so host and clients that share the seed agree on draw order.
//!
//! ## Usage
//!
//! ```
//! use freelancer_engine::cards::{Card, CardId, CardKind, CatalogueBuilder};
//! use freelancer_engine::core::{EngineConfig, Side};
//! use freelancer_engine::deck::{DeckManager, DeckProfile};
//!
//! let mut builder = CatalogueBuilder::new();
//! builder.register(Card::energy(CardId::new(0), "Reload", CardKind::Utility));
//! let catalogue = builder.build();
//!
//! let mut decks = DeckManager::new(&EngineConfig::default());
//! let profile = DeckProfile::new().with_copies(CardId::new(0), 4);
//! decks.build_deck(Side::One, Some(&profile), &catalogue);
//!
//! assert_eq!(decks.draw_pile(Side::One).len(), 4);
//! assert_eq!(decks.draw(Side::One), Some(CardId::new(0)));
//! assert_eq!(decks.hand(Side::One).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Catalogue};
use crate::core::{EngineConfig, GameRng, Side, SideMap};
use crate::error::Diagnostic;

/// One line of a deck list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    #[serde(default = "default_copies")]
    pub copies: u32,
}

fn default_copies() -> u32 {
    1
}

/// A deck list a side's draw pile is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckProfile {
    pub entries: Vec<DeckEntry>,
}

impl DeckProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a card (builder pattern).
    #[must_use]
    pub fn with_copies(mut self, card: CardId, copies: u32) -> Self {
        self.entries.push(DeckEntry { card, copies });
        self
    }

    /// Total number of cards.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.iter().map(|e| e.copies as usize).sum()
    }
}

/// The three piles of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideDeck {
    pub draw_pile: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
}

/// Deck state for both sides.
#[derive(Clone, Debug)]
pub struct DeckManager {
    decks: SideMap<SideDeck>,
    rngs: SideMap<GameRng>,
    max_hand_size: usize,
}

impl DeckManager {
    /// Create empty decks.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let root = GameRng::new(config.shuffle_seed);
        Self {
            decks: SideMap::with_default(),
            rngs: SideMap::new(|side| root.for_side(side)),
            max_hand_size: config.max_hand_size,
        }
    }

    /// Build and shuffle a side's draw pile from a profile.
    ///
    /// A missing profile leaves the side with an empty deck. Cards unknown
    /// to the catalogue are skipped. Either case is reported.
    pub fn build_deck(
        &mut self,
        side: Side,
        profile: Option<&DeckProfile>,
        catalogue: &Catalogue,
    ) -> Vec<Diagnostic> {
        let deck = &mut self.decks[side];
        *deck = SideDeck::default();

        let Some(profile) = profile else {
            tracing::warn!(%side, "No deck profile, side starts with an empty deck");
            return vec![Diagnostic::MissingDeckProfile(side)];
        };

        let mut diagnostics = Vec::new();
        for entry in &profile.entries {
            if !catalogue.contains(entry.card) {
                tracing::warn!(%side, card = %entry.card, "Deck profile names an unknown card");
                diagnostics.push(Diagnostic::MissingCard(entry.card));
                continue;
            }
            deck.draw_pile
                .extend(std::iter::repeat(entry.card).take(entry.copies as usize));
        }

        self.shuffle(side);
        tracing::debug!(%side, cards = self.decks[side].draw_pile.len(), "Built deck");
        diagnostics
    }

    /// Shuffle a side's draw pile.
    pub fn shuffle(&mut self, side: Side) {
        let rng = &mut self.rngs[side];
        rng.shuffle(&mut self.decks[side].draw_pile);
    }

    /// Draw the top card.
    ///
    /// Returns `None` on an empty pile, leaving the discard pile untouched.
    /// A card drawn into a full hand goes to the discard pile.
    pub fn draw(&mut self, side: Side) -> Option<CardId> {
        let deck = &mut self.decks[side];
        let Some(card) = deck.draw_pile.pop() else {
            tracing::warn!(%side, "Draw from an empty pile");
            return None;
        };

        if deck.hand.len() >= self.max_hand_size {
            tracing::debug!(%side, %card, "Hand full, drawn card discarded");
            deck.discard.push(card);
        } else {
            deck.hand.push(card);
        }
        Some(card)
    }

    /// Draw up to `count` cards, stopping at the first empty draw.
    pub fn draw_many(&mut self, side: Side, count: usize) -> Vec<CardId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(side) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Deal starting hands to both sides.
    pub fn deal_starting_hands(&mut self, size: usize) {
        for side in Side::ALL {
            self.draw_many(side, size);
        }
    }

    #[must_use]
    pub fn deck(&self, side: Side) -> &SideDeck {
        &self.decks[side]
    }

    #[must_use]
    pub fn draw_pile(&self, side: Side) -> &[CardId] {
        &self.decks[side].draw_pile
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &[CardId] {
        &self.decks[side].hand
    }

    #[must_use]
    pub fn discard(&self, side: Side) -> &[CardId] {
        &self.decks[side].discard
    }

    /// Remove a card from a side's hand.
    pub fn take_from_hand(&mut self, side: Side, card: CardId) -> bool {
        remove_first(&mut self.decks[side].hand, card)
    }

    /// Move a card from hand to the discard pile.
    pub fn discard_from_hand(&mut self, side: Side, card: CardId) -> bool {
        if !self.take_from_hand(side, card) {
            return false;
        }
        self.decks[side].discard.push(card);
        true
    }

    /// Shuffle RNG state of a side, for resynchronising a client.
    #[must_use]
    pub fn rng_state(&self, side: Side) -> crate::core::GameRngState {
        self.rngs[side].state()
    }

    pub(crate) fn remove_draw(&mut self, side: Side, card: CardId) -> bool {
        remove_first(&mut self.decks[side].draw_pile, card)
    }

    pub(crate) fn push_discard(&mut self, side: Side, card: CardId) {
        self.decks[side].discard.push(card);
    }

    pub(crate) fn push_hand(&mut self, side: Side, card: CardId) -> bool {
        let deck = &mut self.decks[side];
        if deck.hand.len() >= self.max_hand_size {
            return false;
        }
        deck.hand.push(card);
        true
    }
}

fn remove_first(pile: &mut Vec<CardId>, card: CardId) -> bool {
    match pile.iter().position(|&c| c == card) {
        Some(index) => {
            pile.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardKind, CatalogueBuilder};
    use crate::deck::DeckCollaborator;
    use std::sync::Arc;

    fn catalogue() -> Arc<Catalogue> {
        let mut builder = CatalogueBuilder::new();
        builder.register(Card::energy(CardId::new(0), "Reload", CardKind::Utility));
        builder.register(Card::energy(CardId::new(1), "Sprint", CardKind::Action));
        builder.build()
    }

    fn profile() -> DeckProfile {
        DeckProfile::new()
            .with_copies(CardId::new(0), 3)
            .with_copies(CardId::new(1), 2)
    }

    #[test]
    fn test_build_deck() {
        let cat = catalogue();
        let mut decks = DeckManager::new(&EngineConfig::default());
        let diagnostics = decks.build_deck(Side::One, Some(&profile()), &cat);

        assert!(diagnostics.is_empty());
        assert_eq!(decks.draw_pile(Side::One).len(), 5);
        assert!(decks.draw_pile(Side::Two).is_empty());
    }

    #[test]
    fn test_missing_profile_yields_empty_deck() {
        let cat = catalogue();
        let mut decks = DeckManager::new(&EngineConfig::default());
        let diagnostics = decks.build_deck(Side::Two, None, &cat);

        assert_eq!(diagnostics, vec![Diagnostic::MissingDeckProfile(Side::Two)]);
        assert!(decks.draw_pile(Side::Two).is_empty());
    }

    #[test]
    fn test_unknown_cards_skipped() {
        let cat = catalogue();
        let mut decks = DeckManager::new(&EngineConfig::default());
        let profile = DeckProfile::new()
            .with_copies(CardId::new(0), 1)
            .with_copies(CardId::new(42), 2);

        let diagnostics = decks.build_deck(Side::One, Some(&profile), &cat);
        assert_eq!(diagnostics, vec![Diagnostic::MissingCard(CardId::new(42))]);
        assert_eq!(decks.draw_pile(Side::One), &[CardId::new(0)]);
    }

    #[test]
    fn test_empty_draw_leaves_discard_unchanged() {
        let mut decks = DeckManager::new(&EngineConfig::default());
        decks.push_discard(Side::One, CardId::new(1));

        assert_eq!(decks.draw(Side::One), None);
        assert_eq!(decks.discard(Side::One), &[CardId::new(1)]);
        assert!(decks.hand(Side::One).is_empty());
    }

    #[test]
    fn test_hand_limit_sends_draws_to_discard() {
        let cat = catalogue();
        let config = EngineConfig::default().with_starting_hand_size(1).with_max_hand_size(2);
        let mut decks = DeckManager::new(&config);
        decks.build_deck(Side::One, Some(&profile()), &cat);

        let drawn = decks.draw_many(Side::One, 3);
        assert_eq!(drawn.len(), 3);
        assert_eq!(decks.hand(Side::One).len(), 2);
        assert_eq!(decks.discard(Side::One).len(), 1);
    }

    #[test]
    fn test_same_seed_same_order() {
        let cat = catalogue();
        let config = EngineConfig::default().with_shuffle_seed(99);
        let mut host = DeckManager::new(&config);
        let mut client = DeckManager::new(&config);
        host.build_deck(Side::One, Some(&profile()), &cat);
        client.build_deck(Side::One, Some(&profile()), &cat);

        assert_eq!(host.draw_pile(Side::One), client.draw_pile(Side::One));
        assert_eq!(host.rng_state(Side::One), client.rng_state(Side::One));
    }

    #[test]
    fn test_list_filtered_and_discard_from_hand() {
        let cat = catalogue();
        let mut decks = DeckManager::new(&EngineConfig::default());
        decks.build_deck(Side::One, Some(&profile()), &cat);

        let actions = decks.list_filtered(Side::One, &cat, CardKind::Action);
        assert_eq!(actions, vec![CardId::new(1); 2]);

        let card = decks.draw(Side::One).unwrap();
        assert!(decks.discard_from_hand(Side::One, card));
        assert!(!decks.discard_from_hand(Side::One, card));
        assert_eq!(decks.discard(Side::One), &[card]);
    }
}
