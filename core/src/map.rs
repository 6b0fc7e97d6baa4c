//! Immutable tile map supplied by the map-loading collaborator.

use thiserror::Error;

use crate::geometry::Rect;

/// Location of a single map tile expressed in whole-tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    x: i32,
    y: i32,
}

impl Tile {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// Reasons a [`WorldMap`] cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// Tiles must span at least one world unit.
    #[error("tile size must be a positive number of world units")]
    ZeroTileSize,
}

/// Ground and water layers of the arena.
///
/// Ground tiles are solid and block movement; water tiles are the surface
/// enemies spawn on and never block anything.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldMap {
    tile_size: u32,
    ground: Vec<Tile>,
    water: Vec<Tile>,
}

impl WorldMap {
    /// Creates a map from its tile size and both tile layers.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroTileSize`] when `tile_size` is zero.
    pub fn new(tile_size: u32, ground: Vec<Tile>, water: Vec<Tile>) -> Result<Self, MapError> {
        if tile_size == 0 {
            return Err(MapError::ZeroTileSize);
        }

        Ok(Self {
            tile_size,
            ground,
            water,
        })
    }

    /// Side length of every tile measured in world units.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Solid tiles that block movement.
    #[must_use]
    pub fn ground(&self) -> &[Tile] {
        &self.ground
    }

    /// Water tiles that enemies may spawn on.
    #[must_use]
    pub fn water(&self) -> &[Tile] {
        &self.water
    }

    /// World-space rectangle covered by `tile`.
    #[must_use]
    pub fn tile_rect(&self, tile: Tile) -> Rect {
        let size = self.tile_size as f32;
        Rect::new(tile.x() as f32 * size, tile.y() as f32 * size, size, size)
    }

    /// Iterator over the world-space rectangles of all ground tiles.
    pub fn ground_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ground.iter().map(|tile| self.tile_rect(*tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tile_size_is_rejected() {
        assert_eq!(
            WorldMap::new(0, Vec::new(), Vec::new()),
            Err(MapError::ZeroTileSize)
        );
    }

    #[test]
    fn tile_rect_scales_by_tile_size() {
        let map = WorldMap::new(16, vec![Tile::new(3, -2)], Vec::new()).expect("valid map");

        assert_eq!(map.tile_rect(Tile::new(3, -2)), Rect::new(48.0, -32.0, 16.0, 16.0));
        assert_eq!(map.ground_rects().count(), 1);
    }
}
