#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision resolution between moving bodies and the solid ground layer.
//!
//! Resolution is all-or-nothing: a body whose hit-box intersects any ground
//! tile is returned to where it stood before the tick, with no sliding along
//! walls.

use axolotl_core::{Rect, WorldMap};
use glam::Vec2;

/// Resolves the position of a body after movement integration.
///
/// `hit_box` must already reflect `position`. When it overlaps any ground
/// tile the whole move is rejected and `previous` is returned; otherwise
/// `position` stands.
#[must_use]
pub fn resolve(hit_box: &Rect, position: Vec2, previous: Vec2, map: &WorldMap) -> Vec2 {
    if overlaps_ground(hit_box, map) {
        previous
    } else {
        position
    }
}

/// Reports whether `rect` intersects any ground tile of `map`.
#[must_use]
pub fn overlaps_ground(rect: &Rect, map: &WorldMap) -> bool {
    map.ground_rects().any(|tile| rect.overlaps(&tile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axolotl_core::Tile;

    #[test]
    fn open_water_keeps_current_position() {
        let map = WorldMap::new(32, Vec::new(), vec![Tile::new(0, 0)]).expect("valid map");
        let hit_box = Rect::new(5.0, 5.0, 10.0, 10.0);

        let resolved = resolve(&hit_box, Vec2::new(1.0, 1.0), Vec2::ZERO, &map);
        assert_eq!(resolved, Vec2::new(1.0, 1.0));
    }
}
