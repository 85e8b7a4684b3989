use std::collections::VecDeque;

use tracing::warn;

use crate::grid::WalkabilityGrid;

// =============================================================================
// BFS PATHFINDING
// =============================================================================

/// A single cardinal step in the emitted action grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Right,
    Left,
    Down,
    Up,
}

impl Move {
    /// The letter this move contributes to the action string.
    pub const fn letter(self) -> char {
        match self {
            Move::Right => 'R',
            Move::Left => 'L',
            Move::Down => 'D',
            Move::Up => 'U',
        }
    }

    /// Grid offset of one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::Right => (1, 0),
            Move::Left => (-1, 0),
            Move::Down => (0, 1),
            Move::Up => (0, -1),
        }
    }
}

/// Fixed expansion order. BFS visits neighbors Right, Left, Down, Up, which
/// pins the tie-break among equal-length paths deterministically.
const EXPANSION_ORDER: [Move; 4] = [Move::Right, Move::Left, Move::Down, Move::Up];

// ── PathResult ───────────────────────────────────────────────────────────────

/// A shortest route: the coordinates visited (start through end inclusive)
/// and the move between each consecutive pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// One move per step; always `coords.len() - 1` entries.
    pub moves: Vec<Move>,
    /// Visited quadrants from start to end inclusive.
    pub coords: Vec<(i32, i32)>,
}

impl PathResult {
    /// The action string in the emulator input grammar: each letter
    /// followed by `;`, e.g. `"R;R;D;"`. An empty route (start == end)
    /// emits an empty string.
    pub fn action_string(&self) -> String {
        let mut s = String::with_capacity(self.moves.len() * 2);
        for m in &self.moves {
            s.push(m.letter());
            s.push(';');
        }
        s
    }
}

// ── bfs_find_path ────────────────────────────────────────────────────────────

/// Unweighted BFS over 4-connected quadrants from `start` to `end`.
///
/// Returns `None` when either endpoint is out of bounds, when `end` is
/// non-walkable, or when no route exists — an unreachable target is an
/// ordinary negative result, not an error. A non-walkable `start` only
/// warns and searches anyway, so a route can begin from a currently-illegal
/// position.
pub fn bfs_find_path(
    grid: &WalkabilityGrid,
    start: (i32, i32),
    end: (i32, i32),
) -> Option<PathResult> {
    let (cols, rows) = (grid.width(), grid.height());
    if cols == 0 || rows == 0 {
        return None;
    }
    if !grid.in_bounds(start.0, start.1) {
        warn!(?start, cols, rows, "path start out of bounds");
        return None;
    }
    if !grid.in_bounds(end.0, end.1) {
        warn!(?end, cols, rows, "path end out of bounds");
        return None;
    }
    if !grid.is_walkable(start.0, start.1) {
        warn!(?start, "path start is blocked, searching anyway");
    }
    if !grid.is_walkable(end.0, end.1) {
        warn!(?end, "path end is blocked");
        return None;
    }

    let idx = |(x, y): (i32, i32)| (y * cols + x) as usize;

    // Arena-indexed predecessor and visited slots, one per cell, so the
    // traversal allocates nothing per node.
    let mut prev: Vec<Option<((i32, i32), Move)>> = vec![None; (cols * rows) as usize];
    let mut visited = vec![false; (cols * rows) as usize];
    let mut queue = VecDeque::new();

    visited[idx(start)] = true;
    queue.push_back(start);

    let mut found = false;
    while let Some((x, y)) = queue.pop_front() {
        if (x, y) == end {
            found = true;
            break;
        }
        for m in EXPANSION_ORDER {
            let (dx, dy) = m.delta();
            let next = (x + dx, y + dy);
            if !grid.is_walkable(next.0, next.1) || visited[idx(next)] {
                continue;
            }
            visited[idx(next)] = true;
            prev[idx(next)] = Some(((x, y), m));
            queue.push_back(next);
        }
    }
    if !found {
        return None;
    }

    // Walk predecessors end -> start, then reverse.
    let mut moves = Vec::new();
    let mut coords = Vec::new();
    let mut current = end;
    while current != start {
        let (parent, m) = prev[idx(current)]?;
        coords.push(current);
        moves.push(m);
        current = parent;
    }
    coords.push(start);
    moves.reverse();
    coords.reverse();

    Some(PathResult { moves, coords })
}

// ── touch_destination ────────────────────────────────────────────────────────

/// Translate a touch on the 9×9 on-screen viewport into a world-space
/// destination quadrant.
///
/// The player always occupies the viewport's center cell `(4, 4)`; the
/// touched cell's offset from that center is applied to the player's world
/// position, clamped to non-negative coordinates.
pub fn touch_destination(player: (i32, i32), screen: (i32, i32)) -> (i32, i32) {
    let dx = screen.0 - 4;
    let dy = screen.1 - 4;
    ((player.0 + dx).max(0), (player.1 + dy).max(0))
}
