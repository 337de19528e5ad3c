//! Engine configuration.
//!
//! The host builds one `EngineConfig` per match, either with the builder
//! methods or from JSON. Values the engine treats as external facts (the
//! area-effect radius, the deck-search destination rule) live here rather
//! than being hardcoded in the resolver.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where a card found by a deck search ends up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDestination {
    #[default]
    Hand,
    Discard,
}

/// Per-match engine configuration.
///
/// ## Example
///
/// ```
/// use freelancer_engine::core::{EngineConfig, SearchDestination};
///
/// let config = EngineConfig::new()
///     .with_area_radius(2)
///     .with_shuffle_seed(7)
///     .with_search_destination(SearchDestination::Discard);
///
/// assert_eq!(config.area_radius, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Radius (in board distance) of `AllyInArea` / `EnemyInArea` targets.
    pub area_radius: u32,

    /// Cards each side draws at match setup.
    pub starting_hand_size: usize,

    /// Hand limit. Draws beyond it go to the discard pile.
    pub max_hand_size: usize,

    /// Seed for deck shuffles. Host and clients share it so they agree on
    /// draw-pile order.
    pub shuffle_seed: u64,

    /// Destination of cards taken by a deck search.
    pub search_destination: SearchDestination,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            area_radius: 1,
            starting_hand_size: 3,
            max_hand_size: 7,
            shuffle_seed: 0,
            search_destination: SearchDestination::Hand,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hand_size == 0 {
            return Err(ConfigError::Invalid("max_hand_size must be at least 1".into()));
        }
        if self.starting_hand_size > self.max_hand_size {
            return Err(ConfigError::Invalid(format!(
                "starting_hand_size ({}) exceeds max_hand_size ({})",
                self.starting_hand_size, self.max_hand_size
            )));
        }
        Ok(())
    }

    /// Set the area-effect radius.
    #[must_use]
    pub fn with_area_radius(mut self, radius: u32) -> Self {
        self.area_radius = radius;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = seed;
        self
    }

    /// Set the deck-search destination.
    #[must_use]
    pub fn with_search_destination(mut self, destination: SearchDestination) -> Self {
        self.search_destination = destination;
        self
    }
}
