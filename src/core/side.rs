//! Sides and per-side data storage.
//!
//! ## Side
//!
//! A match has exactly two sides, player 1 and player 2. `Side` is a
//! closed two-valued type so "the opponent" is always well defined.
//!
//! ## SideMap
//!
//! Per-side storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1.
    One,
    /// Player 2.
    Two,
}

impl Side {
    /// Both sides, in turn order.
    pub const ALL: [Side; 2] = [Side::One, Side::Two];

    /// The opposing side.
    ///
    /// ```
    /// use freelancer_engine::core::Side;
    ///
    /// assert_eq!(Side::One.opponent(), Side::Two);
    /// assert_eq!(Side::Two.opponent(), Side::One);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Zero-based index of this side.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use freelancer_engine::core::{Side, SideMap};
///
/// let mut kills: SideMap<u32> = SideMap::with_value(0);
/// kills[Side::Two] += 1;
///
/// assert_eq!(kills[Side::One], 0);
/// assert_eq!(kills[Side::Two], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::One), factory(Side::Two)],
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T: Default> Default for SideMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::One.index(), 0);
        assert_eq!(Side::Two.index(), 1);
        assert_eq!(Side::One.opponent().opponent(), Side::One);
        assert_eq!(format!("{}", Side::Two), "Player 2");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::One], 0);
        assert_eq!(map[Side::Two], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<Vec<u32>> = SideMap::with_default();

        map[Side::One].push(1);
        map[Side::Two].extend([2, 3]);

        assert_eq!(map[Side::One], vec![1]);
        assert_eq!(map[Side::Two], vec![2, 3]);
    }

    #[test]
    fn test_side_map_iter() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::One, &1), (Side::Two, &2)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
