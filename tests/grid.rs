use std::collections::HashSet;

use rommap::grid::{SPECIAL_FEATURE_TILE_IDS, WalkabilityGrid, walkable_special_quadrants};
use rommap::rom::MapData;

mod common;
use common::block_with_reps;

fn map(width: u32, height: u32, tile_map: Vec<u8>) -> MapData {
    MapData {
        tileset_id: 0,
        width,
        height,
        tile_map,
    }
}

fn walkable(ids: &[u8]) -> HashSet<u8> {
    ids.iter().copied().collect()
}

// ── Grid construction ────────────────────────────────────────────────────────

#[test]
fn grid_dimensions_are_twice_the_block_dimensions() {
    let m = map(3, 2, vec![0; 6]);
    let grid = WalkabilityGrid::build(&m, &[[0u8; 16]], &walkable(&[0x00]));
    assert_eq!(grid.width(), 6);
    assert_eq!(grid.height(), 4);
}

#[test]
fn grid_dimensions_hold_even_without_any_blocks() {
    // Every referenced block is missing; the grid is still full-size,
    // just entirely blocked.
    let m = map(2, 2, vec![5; 4]);
    let grid = WalkabilityGrid::build(&m, &[], &walkable(&[0x00]));
    assert_eq!((grid.width(), grid.height()), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            assert!(!grid.is_walkable(x, y));
        }
    }
}

#[test]
fn each_quadrant_samples_its_bottom_left_subtile() {
    // Only quadrant (1, 0)'s representative (block index 12) is walkable.
    let block = block_with_reps(0x50, 0x50, 0x00, 0x50);
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[block], &walkable(&[0x00]));
    assert!(!grid.is_walkable(0, 0));
    assert!(!grid.is_walkable(1, 0));
    assert!(grid.is_walkable(0, 1));
    assert!(!grid.is_walkable(1, 1));
}

#[test]
fn non_representative_subtiles_do_not_matter() {
    // The whole block is non-walkable filler except the four
    // representatives; all four quadrants still walk.
    let block = block_with_reps(0x00, 0x00, 0x00, 0x00);
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[block], &walkable(&[0x00]));
    for y in 0..2 {
        for x in 0..2 {
            assert!(grid.is_walkable(x, y));
        }
    }
}

#[test]
fn out_of_bounds_cells_read_as_blocked() {
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[[0u8; 16]], &walkable(&[0x00]));
    assert!(grid.is_walkable(0, 0));
    assert!(!grid.is_walkable(-1, 0));
    assert!(!grid.is_walkable(0, 2));
}

#[test]
fn empty_collision_set_blocks_everything() {
    let m = map(2, 2, vec![0; 4]);
    let grid = WalkabilityGrid::build(&m, &[[0u8; 16]], &HashSet::new());
    for y in 0..4 {
        for x in 0..4 {
            assert!(!grid.is_walkable(x, y));
        }
    }
}

// ── Special quadrant classification ──────────────────────────────────────────

#[test]
fn quadrant_with_all_four_special_subtiles_is_special() {
    // 0x04 is both a special feature tile and walkable in this fixture.
    let block = [0x04u8; 16];
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[block], &walkable(&[0x04]));
    let special = walkable_special_quadrants(&m, &[block], &grid);
    assert_eq!(special.len(), 4);
    assert!(special.contains(&(0, 0)));
    assert!(special.contains(&(1, 1)));
}

#[test]
fn partial_special_quadrants_are_excluded() {
    // Three of four subtiles special: not special.
    let mut block = [0x04u8; 16];
    block[0] = 0x50; // quadrant (0,0) subtile set {0,1,4,5} now mixed
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[block], &walkable(&[0x04]));
    let special = walkable_special_quadrants(&m, &[block], &grid);
    assert!(!special.contains(&(0, 0)));
    assert!(special.contains(&(1, 0)));
}

#[test]
fn special_but_blocked_quadrants_are_excluded() {
    // All subtiles special, but nothing is walkable.
    let block = [0x04u8; 16];
    let m = map(1, 1, vec![0]);
    let grid = WalkabilityGrid::build(&m, &[block], &HashSet::new());
    let special = walkable_special_quadrants(&m, &[block], &grid);
    assert!(special.is_empty());
}

#[test]
fn special_set_is_subset_of_walkable_cells() {
    // Mixed map: a special block, a plain walkable block, a blocked one.
    let special_block = [0x04u8; 16];
    let plain = block_with_reps(0x00, 0x00, 0x00, 0x00);
    let wall = [0x50u8; 16];
    let m = map(3, 1, vec![0, 1, 2]);
    let blocks = [special_block, plain, wall];
    let grid = WalkabilityGrid::build(&m, &blocks, &walkable(&[0x00, 0x04]));
    let special = walkable_special_quadrants(&m, &blocks, &grid);
    assert!(!special.is_empty());
    for &(x, y) in &special {
        assert!(grid.is_walkable(x, y));
    }
}

#[test]
fn special_table_has_the_expected_ids() {
    // A few sentinels from the fixed game table.
    for id in [0x04, 0x1D, 0x7B, 0x82, 0x1B] {
        assert!(SPECIAL_FEATURE_TILE_IDS.contains(&id));
    }
    assert_eq!(SPECIAL_FEATURE_TILE_IDS.len(), 39);
    assert!(!SPECIAL_FEATURE_TILE_IDS.contains(&0x00));
}
