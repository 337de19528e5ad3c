//! Action kinds, trigger masks and action history records.
//!
//! Every resolution is keyed by an `ActionKind`. Modifiers declare which
//! kinds they react to with an `ActionMask`, a small bitmask; a modifier
//! is considered for an action when its mask intersects the action's bit.
//!
//! ```
//! use freelancer_engine::core::{ActionKind, ActionMask};
//!
//! let mask = ActionMask::ATTACK.union(ActionMask::ROLL);
//! assert!(mask.triggers(ActionKind::Roll));
//! assert!(!mask.triggers(ActionKind::Move));
//! assert!(ActionMask::ANY.triggers(ActionKind::UseCard));
//! ```

use serde::{Deserialize, Serialize};

use super::entity::{FreelancerId, TileIndex};
use super::side::Side;
use crate::cards::CardId;

/// The kind of action being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Move a freelancer to a tile.
    Move,
    /// Attack a target.
    Attack,
    /// Roll dice.
    Roll,
    /// Play or use a card.
    UseCard,
    /// End the current turn.
    EndTurn,
}

impl ActionKind {
    /// All action kinds.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Move,
        ActionKind::Attack,
        ActionKind::Roll,
        ActionKind::UseCard,
        ActionKind::EndTurn,
    ];

    /// The single-bit mask for this kind.
    #[must_use]
    pub const fn mask(self) -> ActionMask {
        match self {
            ActionKind::Move => ActionMask::MOVE,
            ActionKind::Attack => ActionMask::ATTACK,
            ActionKind::Roll => ActionMask::ROLL,
            ActionKind::UseCard => ActionMask::USE_CARD,
            ActionKind::EndTurn => ActionMask::END_TURN,
        }
    }
}

/// A set of action kinds represented as bitflags.
///
/// Serialized as the raw bit pattern so catalogue records stay flat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMask(pub u8);

impl ActionMask {
    pub const NONE: Self = Self(0);
    pub const MOVE: Self = Self(1 << 0);
    pub const ATTACK: Self = Self(1 << 1);
    pub const ROLL: Self = Self(1 << 2);
    pub const USE_CARD: Self = Self(1 << 3);
    pub const END_TURN: Self = Self(1 << 4);
    pub const ANY: Self = Self(0b1_1111);

    /// Returns true if the action kind is in this mask.
    #[must_use]
    pub const fn triggers(self, kind: ActionKind) -> bool {
        self.0 & kind.mask().0 != 0
    }

    /// Returns true if the two masks share any kind.
    #[must_use]
    pub const fn intersects(self, other: ActionMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the union of two masks.
    #[must_use]
    pub const fn union(self, other: ActionMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if no kind is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for ActionMask {
    fn default() -> Self {
        Self::ANY
    }
}

impl FromIterator<ActionKind> for ActionMask {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |mask, kind| mask.union(kind.mask()))
    }
}

/// Which dice a roll action is for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollKind {
    #[default]
    Attack,
    Defense,
    /// Roll made before firing, stored on the freelancer for later use.
    PreFire,
}

/// Action-specific data carried alongside a resolution request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxParameters {
    /// Raw die roll to remap (roll actions).
    pub raw_roll: Option<i64>,
    /// Which dice are being rolled.
    pub roll_kind: RollKind,
    /// Destination of a move.
    pub destination: Option<TileIndex>,
    /// Card being used (use-card actions).
    pub card: Option<CardId>,
    /// Ally picked when the card was played.
    pub chosen_ally: Option<FreelancerId>,
    /// Preferred pick for a deck search, if it is a valid candidate.
    #[serde(default)]
    pub search_choice: Option<CardId>,
}

impl AuxParameters {
    /// Parameters carrying a raw roll.
    #[must_use]
    pub fn roll(raw: i64) -> Self {
        Self {
            raw_roll: Some(raw),
            ..Self::default()
        }
    }

    /// Set the roll kind (builder pattern).
    #[must_use]
    pub fn with_roll_kind(mut self, kind: RollKind) -> Self {
        self.roll_kind = kind;
        self
    }

    /// Set the played card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card = Some(card);
        self
    }

    /// Set the chosen ally (builder pattern).
    #[must_use]
    pub fn with_chosen_ally(mut self, ally: FreelancerId) -> Self {
        self.chosen_ally = Some(ally);
        self
    }

    /// Set the preferred deck-search pick (builder pattern).
    #[must_use]
    pub fn with_search_choice(mut self, card: CardId) -> Self {
        self.search_choice = Some(card);
        self
    }

    /// Set the move destination (builder pattern).
    #[must_use]
    pub fn with_destination(mut self, tile: TileIndex) -> Self {
        self.destination = Some(tile);
        self
    }
}

/// A resolved action in the match history.
///
/// Conditions read the history (first team action, kills this round), so
/// every committed resolution appends one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Side that acted.
    pub side: Side,
    /// Kind of action.
    pub kind: ActionKind,
    /// Acting freelancer.
    pub source: FreelancerId,
    /// Explicit target, if any.
    pub target: Option<FreelancerId>,
    /// Turn number when the action was taken.
    pub turn: u32,
    /// Sequence number within the turn.
    pub sequence: u32,
}
