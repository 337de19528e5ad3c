//! Card catalogue.
//!
//! The catalogue is assembled with a `CatalogueBuilder` and then frozen
//! behind an `Arc`. Nothing mutates it during a match; every other part
//! of the engine holds `CardId`s and looks definitions up here.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardKind, SupportCard};

/// Immutable card catalogue.
///
/// ## Example
///
/// ```
/// use freelancer_engine::cards::{Card, CardKind, CatalogueBuilder};
///
/// let mut builder = CatalogueBuilder::new();
/// let id = builder.next_id();
/// builder.register(Card::energy(id, "Overclock", CardKind::Action));
/// let catalogue = builder.build();
///
/// assert_eq!(catalogue.get(id).unwrap().name, "Overclock");
/// assert_eq!(catalogue.by_name("Overclock").map(|c| c.id), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    cards: FxHashMap<CardId, Card>,
    names: FxHashMap<String, CardId>,
}

impl Catalogue {
    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get the support payload of a card.
    #[must_use]
    pub fn support(&self, id: CardId) -> Option<&SupportCard> {
        self.get(id).and_then(Card::as_support)
    }

    /// Look a card up by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Card> {
        self.names.get(name).and_then(|id| self.cards.get(id))
    }

    /// Kind of a card.
    #[must_use]
    pub fn kind_of(&self, id: CardId) -> Option<CardKind> {
        self.get(id).map(|c| c.kind)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Find cards by kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.kind == kind)
    }
}

/// Builder for a `Catalogue`.
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    catalogue: Catalogue,
    next_id: u32,
}

impl CatalogueBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next unused card ID.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) -> CardId {
        let id = card.id;
        if self.catalogue.cards.contains_key(&id) {
            panic!("Card with ID {:?} already registered", id);
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.catalogue.names.insert(card.name.clone(), id);
        self.catalogue.cards.insert(id, card);
        id
    }

    /// Check whether a name is already taken.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.catalogue.names.contains_key(name)
    }

    /// Freeze the catalogue.
    #[must_use]
    pub fn build(self) -> Arc<Catalogue> {
        Arc::new(self.catalogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FreelancerStats;

    #[test]
    fn test_register_and_get() {
        let mut builder = CatalogueBuilder::new();
        let id = builder.next_id();
        builder.register(Card::energy(id, "Reload", CardKind::Utility));
        let catalogue = builder.build();

        assert_eq!(catalogue.get(id).unwrap().name, "Reload");
        assert_eq!(catalogue.kind_of(id), Some(CardKind::Utility));
        assert!(catalogue.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_next_id_skips_explicit_ids() {
        let mut builder = CatalogueBuilder::new();
        builder.register(Card::energy(CardId::new(5), "A", CardKind::Action));
        assert_eq!(builder.next_id(), CardId::new(6));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut builder = CatalogueBuilder::new();
        builder.register(Card::energy(CardId::new(1), "A", CardKind::Action));
        builder.register(Card::energy(CardId::new(1), "B", CardKind::Action));
    }

    #[test]
    fn test_support_lookup_and_kind_filter() {
        let mut builder = CatalogueBuilder::new();
        let skill = builder.next_id();
        builder.register(Card::support(skill, "Focus", CardKind::Skill, SupportCard::new()));
        let unit = builder.next_id();
        builder.register(Card::unit(unit, "Vex", FreelancerStats::default()));
        let catalogue = builder.build();

        assert!(catalogue.support(skill).is_some());
        assert!(catalogue.support(unit).is_none());
        assert_eq!(catalogue.find_by_kind(CardKind::Freelancer).count(), 1);
    }
}
