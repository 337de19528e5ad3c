//! Core engine types: identifiers, sides, actions, freelancers, match state,
//! RNG and configuration.

pub mod entity;
pub mod side;
pub mod rng;
pub mod config;
pub mod action;
pub mod freelancer;
pub mod state;

pub use entity::{FreelancerId, TileIndex};
pub use side::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, SearchDestination};
pub use action::{ActionKind, ActionMask, ActionRecord, AuxParameters, RollKind};
pub use freelancer::{FreelancerInstance, FreelancerStats, Role};
pub use state::{Elimination, MatchState};
