//! Decks: per-side piles and the search bridge used by `SearchDeck`
//! modifiers.

pub mod manager;
pub mod search;

pub use manager::{DeckEntry, DeckManager, DeckProfile, SideDeck};
pub use search::{DeckCollaborator, DeckSearchBridge, FirstCandidate, SearchChooser};
