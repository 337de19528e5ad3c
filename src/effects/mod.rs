//! Effect system for support cards.
//!
//! ## Key Types
//!
//! - `Modifier`: Declarative rule record (logic, stat, value, masks)
//! - `EffectTarget` / `TargetResolver`: Who an applied effect lands on
//! - `ActiveEffect` / `ActiveEffectTracker`: Effects attached to freelancers
//! - `ComplexEffect`: Irregular card logic dispatched by kind
//! - `ModifierResolver`: Folds eligible modifiers into a `ResolutionContext`
//! - `ResolvedEffects`: Everything an action changes, ready to commit

mod active;
mod complex;
mod context;
mod modifier;
mod resolver;
mod targeting;

pub use active::{ActiveEffect, ActiveEffectTracker, EffectRef};
pub use complex::ComplexEffect;
pub use context::ResolutionContext;
pub use modifier::{Modifier, ModifierLogic, StatKind};
pub use resolver::{
    AppliedModifier, DeckMutation, ModifierResolver, PassiveReport, PendingEffect, ResolveRequest,
    ResolvedEffects,
};
pub use targeting::{EffectTarget, TargetResolver, TargetSet};
