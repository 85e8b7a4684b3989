use rommap::grid::WalkabilityGrid;
use rommap::pathfinding::prelude::*;

fn open_grid(w: i32, h: i32) -> WalkabilityGrid {
    WalkabilityGrid::from_fn(w, h, |_, _| true)
}

/// Replay a move sequence from `start` and return where it lands.
fn replay(start: (i32, i32), moves: &[Move]) -> (i32, i32) {
    moves.iter().fold(start, |(x, y), m| {
        let (dx, dy) = m.delta();
        (x + dx, y + dy)
    })
}

// ── Basic routes ─────────────────────────────────────────────────────────────

#[test]
fn start_equals_end_yields_empty_route() {
    let path = bfs_find_path(&open_grid(5, 5), (2, 2), (2, 2)).unwrap();
    assert!(path.moves.is_empty());
    assert_eq!(path.coords, vec![(2, 2)]);
    assert_eq!(path.action_string(), "");
}

#[test]
fn straight_line_route() {
    let path = bfs_find_path(&open_grid(6, 1), (0, 0), (4, 0)).unwrap();
    assert_eq!(path.coords.len(), 5);
    assert_eq!(path.action_string(), "R;R;R;R;");
}

#[test]
fn moves_are_one_shorter_than_coords() {
    let path = bfs_find_path(&open_grid(8, 8), (1, 1), (6, 5)).unwrap();
    assert_eq!(path.moves.len(), path.coords.len() - 1);
}

#[test]
fn replaying_actions_reproduces_the_end() {
    let grid = WalkabilityGrid::from_fn(7, 7, |x, y| !(x == 3 && y != 6));
    let path = bfs_find_path(&grid, (0, 0), (6, 0)).unwrap();
    assert_eq!(replay((0, 0), &path.moves), (6, 0));
    assert_eq!(path.coords.first(), Some(&(0, 0)));
    assert_eq!(path.coords.last(), Some(&(6, 0)));
}

#[test]
fn route_is_shortest() {
    let path = bfs_find_path(&open_grid(10, 10), (0, 0), (3, 4)).unwrap();
    assert_eq!(path.moves.len(), 7); // manhattan distance
}

#[test]
fn expansion_order_fixes_the_tie_break() {
    // Both R;D; and D;R; are shortest; Right expands before Down, so the
    // first move must be Right.
    let path = bfs_find_path(&open_grid(3, 3), (0, 0), (1, 1)).unwrap();
    assert_eq!(path.moves, vec![Move::Right, Move::Down]);
    assert_eq!(path.action_string(), "R;D;");
}

// ── Negative results ─────────────────────────────────────────────────────────

#[test]
fn fully_blocked_grid_has_no_route() {
    let grid = WalkabilityGrid::from_fn(4, 4, |_, _| false);
    assert!(bfs_find_path(&grid, (0, 0), (3, 3)).is_none());
}

#[test]
fn unreachable_end_is_none_not_an_error() {
    // Wall across x=2 splits the grid.
    let grid = WalkabilityGrid::from_fn(5, 5, |x, _| x != 2);
    assert!(bfs_find_path(&grid, (0, 0), (4, 4)).is_none());
}

#[test]
fn out_of_bounds_endpoints_are_none() {
    let grid = open_grid(5, 5);
    assert!(bfs_find_path(&grid, (-1, 0), (3, 3)).is_none());
    assert!(bfs_find_path(&grid, (0, 0), (5, 0)).is_none());
    assert!(bfs_find_path(&grid, (0, 0), (0, -1)).is_none());
}

#[test]
fn blocked_end_is_none() {
    let grid = WalkabilityGrid::from_fn(5, 5, |x, y| !(x == 4 && y == 4));
    assert!(bfs_find_path(&grid, (0, 0), (4, 4)).is_none());
}

#[test]
fn blocked_start_still_searches() {
    // A route may begin from a currently-illegal position: the start cell
    // itself is blocked but its neighbors are open, and the search runs.
    let grid = WalkabilityGrid::from_fn(5, 1, |x, _| x != 0);
    let path = bfs_find_path(&grid, (0, 0), (4, 0)).unwrap();
    assert_eq!(path.action_string(), "R;R;R;R;");
}

#[test]
fn isolated_blocked_start_finds_nothing() {
    // Blocked start surrounded by blocked cells: search runs, no route.
    let grid = WalkabilityGrid::from_fn(5, 1, |x, _| x > 1);
    assert!(bfs_find_path(&grid, (0, 0), (4, 0)).is_none());
}

#[test]
fn empty_grid_is_none() {
    let grid = WalkabilityGrid::from_fn(0, 0, |_, _| true);
    assert!(bfs_find_path(&grid, (0, 0), (0, 0)).is_none());
}

// ── touch_destination ────────────────────────────────────────────────────────

#[test]
fn touch_center_targets_the_player_cell() {
    assert_eq!(touch_destination((10, 7), (4, 4)), (10, 7));
}

#[test]
fn touch_offsets_apply_relative_to_center() {
    assert_eq!(touch_destination((10, 7), (6, 2)), (12, 5));
    assert_eq!(touch_destination((10, 7), (0, 8)), (6, 11));
}

#[test]
fn touch_destination_clamps_to_non_negative() {
    assert_eq!(touch_destination((1, 0), (0, 0)), (0, 0));
}
