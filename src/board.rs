//! Board collaborator.
//!
//! Board geometry lives outside the engine. The resolver only asks the
//! questions in `Board`: where a freelancer stands, how far apart two
//! tiles are, whether a tile is an objective. `GridBoard` is a plain
//! rectangular grid for hosts that don't bring their own.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{FreelancerId, TileIndex};

/// Queries the engine makes against the board.
pub trait Board {
    /// Tile a freelancer currently stands on.
    fn position(&self, id: FreelancerId) -> Option<TileIndex>;

    /// Move (or place) a freelancer.
    fn place(&mut self, id: FreelancerId, tile: TileIndex);

    /// Distance between two tiles in movement steps.
    fn distance(&self, a: TileIndex, b: TileIndex) -> u32;

    /// Whether `b` is visible from `a`.
    fn has_line_of_sight(&self, a: TileIndex, b: TileIndex) -> bool;

    /// Whether a tile is an objective.
    fn is_objective(&self, tile: TileIndex) -> bool;

    /// Whether two tiles touch.
    fn is_adjacent(&self, a: TileIndex, b: TileIndex) -> bool {
        self.distance(a, b) == 1
    }

    /// Distance between two freelancers, if both are on the board.
    fn distance_between(&self, a: FreelancerId, b: FreelancerId) -> Option<u32> {
        Some(self.distance(self.position(a)?, self.position(b)?))
    }

    /// The candidates standing within `radius` of `center`.
    fn within_radius(&self, center: TileIndex, radius: u32, candidates: &[FreelancerId]) -> Vec<FreelancerId> {
        candidates
            .iter()
            .copied()
            .filter(|&id| self.position(id).is_some_and(|tile| self.distance(center, tile) <= radius))
            .collect()
    }
}

/// Rectangular grid with Manhattan distance.
///
/// Tiles are numbered row by row: `index = y * width + x`.
///
/// ```
/// use freelancer_engine::board::{Board, GridBoard};
/// use freelancer_engine::core::TileIndex;
///
/// let board = GridBoard::new(5, 5);
/// assert_eq!(board.distance(board.tile(0, 0), board.tile(2, 3)), 5);
/// assert!(board.is_adjacent(TileIndex(0), TileIndex(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GridBoard {
    width: u32,
    height: u32,
    positions: FxHashMap<FreelancerId, TileIndex>,
    objectives: FxHashSet<TileIndex>,
    walls: FxHashSet<TileIndex>,
}

impl GridBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Board must have at least one tile");
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Tile index for grid coordinates.
    #[must_use]
    pub fn tile(&self, x: u32, y: u32) -> TileIndex {
        TileIndex(y * self.width + x)
    }

    /// Grid coordinates of a tile.
    #[must_use]
    pub fn coords(&self, tile: TileIndex) -> (u32, u32) {
        (tile.0 % self.width, tile.0 / self.width)
    }

    /// Number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> u32 {
        self.width * self.height
    }

    /// Mark a tile as an objective (builder pattern).
    #[must_use]
    pub fn with_objective(mut self, tile: TileIndex) -> Self {
        self.objectives.insert(tile);
        self
    }

    /// Mark a tile as a wall (builder pattern).
    #[must_use]
    pub fn with_wall(mut self, tile: TileIndex) -> Self {
        self.walls.insert(tile);
        self
    }

    /// Remove a freelancer from the board.
    pub fn remove(&mut self, id: FreelancerId) -> Option<TileIndex> {
        self.positions.remove(&id)
    }
}

impl Board for GridBoard {
    fn position(&self, id: FreelancerId) -> Option<TileIndex> {
        self.positions.get(&id).copied()
    }

    fn place(&mut self, id: FreelancerId, tile: TileIndex) {
        self.positions.insert(id, tile);
    }

    fn distance(&self, a: TileIndex, b: TileIndex) -> u32 {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        ax.abs_diff(bx) + ay.abs_diff(by)
    }

    fn has_line_of_sight(&self, a: TileIndex, b: TileIndex) -> bool {
        // Walk the line between tile centres; any wall strictly between
        // the endpoints blocks it.
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        let (ax, ay, bx, by) = (ax as i64, ay as i64, bx as i64, by as i64);
        let steps = (bx - ax).abs().max((by - ay).abs());
        for step in 1..steps {
            let x = ax + ((bx - ax) * step + steps / 2).div_euclid(steps);
            let y = ay + ((by - ay) * step + steps / 2).div_euclid(steps);
            if self.walls.contains(&TileIndex((y as u32) * self.width + x as u32)) {
                return false;
            }
        }
        true
    }

    fn is_objective(&self, tile: TileIndex) -> bool {
        self.objectives.contains(&tile)
    }
}
