use axolotl_core::{Rect, Tile, WorldMap};
use axolotl_system_collision::{overlaps_ground, resolve};
use glam::Vec2;

#[test]
fn overlapping_ground_restores_previous_position() {
    let map = walled_map();
    let previous = Vec2::new(20.0, 20.0);
    let position = Vec2::new(21.0, 20.0);
    let hit_box = Rect::new(30.0, 30.0, 10.0, 10.0);

    let resolved = resolve(&hit_box, position, previous, &map);
    assert_eq!(resolved, previous, "moves into ground must be undone");
}

#[test]
fn touching_a_tile_edge_is_not_a_collision() {
    let map = walled_map();
    let hit_box = Rect::new(22.0, 30.0, 10.0, 10.0);

    assert!(
        !overlaps_ground(&hit_box, &map),
        "a hit-box ending exactly on the tile boundary must not collide"
    );

    let position = Vec2::new(5.0, 5.0);
    assert_eq!(resolve(&hit_box, position, Vec2::ZERO, &map), position);
}

#[test]
fn overlapping_several_tiles_matches_single_tile_result() {
    let map = walled_map();
    let previous = Vec2::new(0.0, 0.0);
    let position = Vec2::new(3.0, 3.0);
    let straddling = Rect::new(60.0, 40.0, 10.0, 10.0);
    let single = Rect::new(40.0, 40.0, 10.0, 10.0);

    assert_eq!(
        resolve(&straddling, position, previous, &map),
        resolve(&single, position, previous, &map)
    );
}

#[test]
fn resolution_is_idempotent() {
    let map = walled_map();
    let previous = Vec2::new(10.0, 10.0);
    let hit_box = Rect::new(35.0, 35.0, 10.0, 10.0);

    let once = resolve(&hit_box, Vec2::new(12.0, 10.0), previous, &map);
    let twice = resolve(&hit_box, once, previous, &map);
    assert_eq!(once, twice);

    let free_box = Rect::new(0.0, 0.0, 10.0, 10.0);
    let free_once = resolve(&free_box, Vec2::new(12.0, 10.0), previous, &map);
    assert_eq!(free_once, resolve(&free_box, free_once, previous, &map));
}

#[test]
fn water_tiles_never_block() {
    let map = WorldMap::new(32, Vec::new(), vec![Tile::new(0, 0), Tile::new(1, 0)])
        .expect("valid map");
    let hit_box = Rect::new(10.0, 10.0, 10.0, 10.0);

    assert!(!overlaps_ground(&hit_box, &map));
}

fn walled_map() -> WorldMap {
    let ground = vec![Tile::new(1, 1), Tile::new(2, 1), Tile::new(1, 2)];
    WorldMap::new(32, ground, Vec::new()).expect("valid map")
}
