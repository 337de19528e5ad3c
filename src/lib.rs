//! # freelancer-engine
//!
//! Effect resolution engine for a two-player, turn-based tactical game in
//! which freelancers move, attack, roll dice and play cards.
//!
//! ## Design Principles
//!
//! 1. **Declarative Cards**: Support cards are flat records of conditions
//!    and modifiers loaded from JSON. Irregular logic is a closed
//!    `ComplexEffect` enum, not open-ended code.
//!
//! 2. **Resolve, Then Commit**: The resolver only reads. It returns a
//!    `ResolvedEffects` that the `MatchContext` commits in one step.
//!
//! 3. **No Ambient State**: One `MatchContext` per match owns the state,
//!    decks and board. Nothing is global.
//!
//! ## Architecture
//!
//! An action is triggered, conditions filter the active effects in scope,
//! target selectors expand effect-applying modifiers, the remaining
//! modifiers fold into a stat context in priority order, and the result
//! is committed. Active effects count down at their carrier's turn end.
//!
//! ## Modules
//!
//! - `core`: IDs, sides, actions, freelancers, match state, RNG, configuration
//! - `cards`: Card definitions, catalogue and JSON loader
//! - `conditions`: Condition gating and passive status reports
//! - `effects`: Modifiers, targeting, active effects and the resolver
//! - `deck`: Per-side piles and deck search
//! - `board`: Board collaborator trait and a grid implementation
//! - `engine`: `MatchContext`, the per-match entry point
//! - `requests`: Client requests, authority checks, queue and codec
//! - `error`: Error types and non-fatal diagnostics

pub mod core;
pub mod cards;
pub mod conditions;
pub mod effects;
pub mod deck;
pub mod board;
pub mod engine;
pub mod requests;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionMask, AuxParameters, EngineConfig, FreelancerId, FreelancerInstance,
    FreelancerStats, MatchState, Role, RollKind, Side, SideMap, TileIndex,
};

pub use crate::cards::{Card, CardId, CardKind, Catalogue, CatalogueBuilder, SupportCard, load_catalogue};

pub use crate::conditions::{Condition, ConditionKind};

pub use crate::effects::{
    ActiveEffect, ComplexEffect, EffectTarget, Modifier, ModifierLogic, ResolvedEffects, StatKind,
};

pub use crate::deck::{DeckManager, DeckProfile};
pub use crate::board::{Board, GridBoard};
pub use crate::engine::MatchContext;
pub use crate::requests::{ActionRequest, RequestQueue};
pub use crate::error::{AuthorityError, CatalogueError, Diagnostic};
