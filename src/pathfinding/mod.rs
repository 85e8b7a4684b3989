mod bfs;

pub mod prelude {
    pub use crate::pathfinding::bfs::*;
}

pub use bfs::{Move, PathResult, bfs_find_path, touch_destination};
