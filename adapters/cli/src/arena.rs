//! Procedural walled arena with scattered rocks and water ponds.

use anyhow::{bail, Result};
use axolotl_core::{RandomSource, Tile, Tuning, WorldMap};

const TILE_SIZE: u32 = 32;
const MIN_EDGE: u32 = 8;
const MAX_EDGE: u32 = 1_024;
const SPAWN_CLEARANCE: i32 = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Open,
    Ground,
    Water,
}

/// Builds a square arena `edge` tiles wide.
///
/// The border is solid ground. Ponds are discs of water; rocks are single
/// ground tiles kept away from the player's spawn point.
pub(crate) fn build(edge: u32, tuning: &Tuning, rng: &mut impl RandomSource) -> Result<WorldMap> {
    if !(MIN_EDGE..=MAX_EDGE).contains(&edge) {
        bail!("arena edge must lie in {MIN_EDGE}..={MAX_EDGE} tiles, got {edge}");
    }
    let side = edge as i32;

    let spawn = tuning.player.spawn_position() / TILE_SIZE as f32;
    let spawn = (spawn.x.floor() as i32, spawn.y.floor() as i32);
    if spawn.0 <= 0 || spawn.1 <= 0 || spawn.0 >= side - 1 || spawn.1 >= side - 1 {
        bail!(
            "player spawn tile ({}, {}) lies outside the {edge}x{edge} arena interior",
            spawn.0,
            spawn.1
        );
    }

    let mut cells = vec![Cell::Open; (edge * edge) as usize];
    let index = |x: i32, y: i32| (y * side + x) as usize;

    for i in 0..side {
        for (x, y) in [(i, 0), (i, side - 1), (0, i), (side - 1, i)] {
            cells[index(x, y)] = Cell::Ground;
        }
    }

    let ponds = (edge / 10).max(1);
    for _ in 0..ponds {
        let cx = rng.int_inclusive(2, side - 3);
        let cy = rng.int_inclusive(2, side - 3);
        let radius = rng.int_inclusive(2, 4);
        for y in (cy - radius).max(1)..=(cy + radius).min(side - 2) {
            for x in (cx - radius).max(1)..=(cx + radius).min(side - 2) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= radius * radius {
                    cells[index(x, y)] = Cell::Water;
                }
            }
        }
    }

    let rocks = edge / 2;
    for _ in 0..rocks {
        let x = rng.int_inclusive(1, side - 2);
        let y = rng.int_inclusive(1, side - 2);
        let near_spawn =
            (x - spawn.0).abs() <= SPAWN_CLEARANCE && (y - spawn.1).abs() <= SPAWN_CLEARANCE;
        if near_spawn || cells[index(x, y)] != Cell::Open {
            continue;
        }
        cells[index(x, y)] = Cell::Ground;
    }

    let mut ground = Vec::new();
    let mut water = Vec::new();
    for y in 0..side {
        for x in 0..side {
            match cells[index(x, y)] {
                Cell::Ground => ground.push(Tile::new(x, y)),
                Cell::Water => water.push(Tile::new(x, y)),
                Cell::Open => {}
            }
        }
    }

    Ok(WorldMap::new(TILE_SIZE, ground, water)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axolotl_core::SeededRandom;

    #[test]
    fn arena_is_walled_and_has_water() {
        let mut rng = SeededRandom::new(11);
        let map = build(40, &Tuning::default(), &mut rng).expect("arena builds");

        assert!(map.ground().contains(&Tile::new(0, 0)));
        assert!(map.ground().contains(&Tile::new(39, 20)));
        assert!(!map.water().is_empty());
        assert!(map
            .water()
            .iter()
            .all(|tile| !map.ground().contains(tile)));
    }

    #[test]
    fn spawn_surroundings_stay_free_of_rocks() {
        let mut rng = SeededRandom::new(3);
        let map = build(40, &Tuning::default(), &mut rng).expect("arena builds");

        assert!(!map.ground().contains(&Tile::new(18, 12)));
    }

    #[test]
    fn tiny_arenas_are_rejected() {
        let mut rng = SeededRandom::new(0);
        assert!(build(4, &Tuning::default(), &mut rng).is_err());
        assert!(build(12, &Tuning::default(), &mut rng).is_err(), "spawn outside");
    }
}
