pub mod bundle;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod render;
pub mod rom;
pub mod tile;

pub use bundle::MapBundle;
pub use error::RomError;
pub use rom::RomImage;
