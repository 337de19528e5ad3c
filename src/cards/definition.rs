//! Card definitions - immutable catalogue data.
//!
//! A `Card` is loaded once and referenced by `CardId` for the rest of the
//! match. Its payload depends on the kind: energy cards carry nothing the
//! engine interprets, support cards carry conditions and modifiers, unit
//! cards carry base stats for freelancers.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::core::{ActionMask, FreelancerStats};
use crate::effects::{ComplexEffect, Modifier};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The closed set of card kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    // === Energy ===
    Action,
    Utility,
    Aura,

    // === Support ===
    Skill,
    Strategy,

    // === Unit ===
    Freelancer,
}

impl CardKind {
    /// Energy cards are equipped on freelancers.
    #[must_use]
    pub const fn is_energy(self) -> bool {
        matches!(self, CardKind::Action | CardKind::Utility | CardKind::Aura)
    }

    /// Support cards carry declarative effects.
    #[must_use]
    pub const fn is_support(self) -> bool {
        matches!(self, CardKind::Skill | CardKind::Strategy)
    }

    /// Unit cards describe freelancers.
    #[must_use]
    pub const fn is_unit(self) -> bool {
        matches!(self, CardKind::Freelancer)
    }
}

/// A support card's rule payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportCard {
    /// All non-passive conditions must hold for the modifiers to apply.
    pub conditions: Vec<Condition>,
    /// Modifiers in declaration order.
    pub modifiers: Vec<Modifier>,
    /// Lifetime in turns (at least 1).
    pub duration: u32,
    /// Whether the same card may be active twice on one freelancer.
    pub can_stack: bool,
    /// Icon shown while a passive condition holds.
    pub custom_status_icon: Option<String>,
    /// Irregular effects dispatched by kind.
    #[serde(default)]
    pub complex_effects: Vec<ComplexEffect>,
}

impl Default for SupportCard {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            modifiers: Vec::new(),
            duration: 1,
            can_stack: false,
            custom_status_icon: None,
            complex_effects: Vec::new(),
        }
    }
}

impl SupportCard {
    /// Create an empty one-turn, non-stacking support payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration-1 cards are used up by the action that fires them.
    ///
    /// Read from the card, not the countdown: a longer effect on its last
    /// turn is not one-shot.
    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.duration <= 1
    }

    /// Actions that use up a one-shot card: the union of its modifiers'
    /// `consumed_by` masks, or every action for a card with no modifiers.
    #[must_use]
    pub fn consumed_by(&self) -> ActionMask {
        if self.modifiers.is_empty() {
            return ActionMask::ANY;
        }
        self.modifiers
            .iter()
            .fold(ActionMask::NONE, |mask, m| mask.union(m.consumed_by))
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Add a complex effect (builder pattern).
    #[must_use]
    pub fn with_complex(mut self, effect: ComplexEffect) -> Self {
        self.complex_effects.push(effect);
        self
    }

    /// Set the duration, clamped to at least one turn.
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration.max(1);
        self
    }

    /// Allow stacking (builder pattern).
    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.can_stack = true;
        self
    }

    /// Set the custom status icon.
    #[must_use]
    pub fn with_status_icon(mut self, icon: impl Into<String>) -> Self {
        self.custom_status_icon = Some(icon.into());
        self
    }
}

/// Kind-specific card payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPayload {
    Energy,
    Support(SupportCard),
    Unit(FreelancerStats),
}

/// An immutable card definition.
///
/// ## Example
///
/// ```
/// use freelancer_engine::cards::{Card, CardId, CardKind, SupportCard};
///
/// let rally = Card::support(CardId::new(1), "Rally", CardKind::Strategy, SupportCard::new().with_duration(2));
///
/// assert!(rally.kind.is_support());
/// assert_eq!(rally.duration(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    /// Display symbol.
    pub symbol: String,
    pub description: String,
    pub payload: CardPayload,
}

impl Card {
    /// Create an energy card.
    #[must_use]
    pub fn energy(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        debug_assert!(kind.is_energy());
        Self::with_payload(id, name, kind, CardPayload::Energy)
    }

    /// Create a support card.
    #[must_use]
    pub fn support(id: CardId, name: impl Into<String>, kind: CardKind, support: SupportCard) -> Self {
        debug_assert!(kind.is_support());
        Self::with_payload(id, name, kind, CardPayload::Support(support))
    }

    /// Create a unit card.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, stats: FreelancerStats) -> Self {
        Self::with_payload(id, name, CardKind::Freelancer, CardPayload::Unit(stats))
    }

    fn with_payload(id: CardId, name: impl Into<String>, kind: CardKind, payload: CardPayload) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            symbol: String::new(),
            description: String::new(),
            payload,
        }
    }

    /// Set the display symbol (builder pattern).
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the description text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The support payload, if this is a support card.
    #[must_use]
    pub fn as_support(&self) -> Option<&SupportCard> {
        match &self.payload {
            CardPayload::Support(support) => Some(support),
            _ => None,
        }
    }

    /// The unit stats, if this is a unit card.
    #[must_use]
    pub fn as_unit(&self) -> Option<&FreelancerStats> {
        match &self.payload {
            CardPayload::Unit(stats) => Some(stats),
            _ => None,
        }
    }

    /// Lifetime of an effect created from this card. Non-support cards last
    /// a single turn.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.as_support().map_or(1, |s| s.duration.max(1))
    }

    /// Whether more than one effect from this card may sit on a freelancer.
    #[must_use]
    pub fn can_stack(&self) -> bool {
        self.as_support().is_some_and(|s| s.can_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_kind_categories() {
        assert!(CardKind::Aura.is_energy());
        assert!(!CardKind::Aura.is_support());
        assert!(CardKind::Skill.is_support());
        assert!(CardKind::Strategy.is_support());
        assert!(CardKind::Freelancer.is_unit());
    }

    #[test]
    fn test_non_support_duration_is_one() {
        let card = Card::energy(CardId::new(1), "Charge", CardKind::Action);
        assert_eq!(card.duration(), 1);
        assert!(!card.can_stack());
        assert!(card.as_support().is_none());
    }

    #[test]
    fn test_duration_clamped() {
        let support = SupportCard::new().with_duration(0);
        assert_eq!(support.duration, 1);
    }

    #[test]
    fn test_unit_payload() {
        let card = Card::unit(CardId::new(3), "Vex", FreelancerStats::default()).with_symbol("V");
        assert_eq!(card.kind, CardKind::Freelancer);
        assert_eq!(card.symbol, "V");
        assert_eq!(card.as_unit().unwrap().max_hp, 10);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::support(
            CardId::new(2),
            "Focus",
            CardKind::Skill,
            SupportCard::new().stackable().with_status_icon("eye"),
        );
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
