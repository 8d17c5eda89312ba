//! Core data types for mortimer.

mod slab;
mod tile;

pub use slab::{PixelFormat, Slab};
pub use tile::{GridSize, TileIndex, TileSize, MAX_TILES};
