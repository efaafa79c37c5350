//! Battlefield geometry.
//!
//! [`GridOracle`] exposes the static layout (bounds and blocking terrain).
//! Distance, direction, area enumeration, line of sight and path walking are
//! provided as default methods so every grid implementation agrees on them;
//! implementations may override them for custom geometry.

use std::collections::BTreeSet;

use crate::skill::AreaShape;
use crate::state::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width as i32 && tile.y < self.height as i32
    }
}

/// Where a forced movement ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStop {
    pub tile: Tile,
    /// True when an obstacle cut the path short.
    pub collided: bool,
}

/// Static battlefield geometry.
pub trait GridOracle: Send + Sync {
    fn dimensions(&self) -> GridDimensions;

    /// Terrain that cannot be entered and blocks sight (walls, pillars).
    fn is_blocked(&self, tile: Tile) -> bool;

    fn contains(&self, tile: Tile) -> bool {
        self.dimensions().contains(tile)
    }

    fn is_passable(&self, tile: Tile) -> bool {
        self.contains(tile) && !self.is_blocked(tile)
    }

    /// Chebyshev distance.
    fn distance(&self, from: Tile, to: Tile) -> u32 {
        (to.x - from.x)
            .unsigned_abs()
            .max((to.y - from.y).unsigned_abs())
    }

    /// Unit step from `from` toward `to`; `(0, 0)` when they coincide.
    fn direction(&self, from: Tile, to: Tile) -> (i32, i32) {
        ((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    fn tile_in_direction(&self, from: Tile, direction: (i32, i32), steps: u32) -> Tile {
        let steps = steps as i32;
        from.offset(direction.0 * steps, direction.1 * steps)
    }

    /// In-bounds tiles of `shape` with `radius` around `center`, row-major.
    fn tiles_in_area(&self, center: Tile, shape: AreaShape, radius: u32) -> Vec<Tile> {
        let r = radius as i32;
        let mut tiles = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let tile = center.offset(dx, dy);
                if shape.contains(dx, dy, radius) && self.contains(tile) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// True when no blocked tile lies strictly between `from` and `to`.
    fn has_line_of_sight(&self, from: Tile, to: Tile) -> bool {
        let line = line_between(from, to);
        line.iter()
            .take(line.len().saturating_sub(1))
            .all(|&tile| !self.is_blocked(tile))
    }

    /// Walks from `from` toward `to`, stopping before the first tile that is
    /// out of bounds, blocked, or reported occupied.
    fn walk(&self, from: Tile, to: Tile, occupied: &dyn Fn(Tile) -> bool) -> PathStop {
        let mut current = from;
        for tile in line_between(from, to) {
            if !self.is_passable(tile) || occupied(tile) {
                return PathStop {
                    tile: current,
                    collided: true,
                };
            }
            current = tile;
        }
        PathStop {
            tile: current,
            collided: false,
        }
    }
}

/// Bresenham line from `from` (exclusive) to `to` (inclusive).
pub fn line_between(from: Tile, to: Tile) -> Vec<Tile> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();

    let mut err = dx + dy;
    let mut current = from;
    let mut tiles = Vec::with_capacity(dx.max(-dy) as usize);

    while current != to {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
        tiles.push(current);
    }
    tiles
}

/// Rectangular grid with a set of blocked tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenGrid {
    pub dimensions: GridDimensions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: BTreeSet<Tile>,
}

impl OpenGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: GridDimensions::new(width, height),
            blocked: BTreeSet::new(),
        }
    }

    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = Tile>) -> Self {
        self.blocked.extend(tiles);
        self
    }
}

impl GridOracle for OpenGrid {
    fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn is_blocked(&self, tile: Tile) -> bool {
        self.blocked.contains(&tile)
    }
}
