//! Entity identification.
//!
//! Freelancers are referenced everywhere by a stable `FreelancerId` that is
//! resolved through the match's freelancer table. Nothing in the engine
//! holds a direct reference to a freelancer across calls, so an eliminated
//! unit can never leave a dangling handle behind.
//!
//! ## Usage
//!
//! ```
//! use freelancer_engine::core::{FreelancerId, TileIndex};
//!
//! let scout = FreelancerId::new(3);
//! assert_eq!(scout.raw(), 3);
//! assert_eq!(format!("{}", scout), "Freelancer(3)");
//!
//! let tile = TileIndex::new(12);
//! assert_eq!(tile.raw(), 12);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier for a freelancer instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FreelancerId(pub u32);

impl FreelancerId {
    /// Create a new freelancer ID.
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

impl From<u32> for FreelancerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FreelancerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Freelancer({})", self.0)
    }
}

/// Index of a board tile.
///
/// The engine never interprets tile indices; the board collaborator
/// maps them to positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex(pub u32);

impl TileIndex {
    /// Create a new tile index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}
