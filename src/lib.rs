//! mortimer - Tile slab deduplicator
//!
//! A library for slicing a grid-aligned slab image into tiles, keeping one
//! copy of each distinct tile in an atlas, and recording which tile sits in
//! each cell in a compact binary map.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod types;

pub use config::Config;
pub use error::{MortimerError, Result};
pub use extract::TileExtractor;
pub use pipeline::{convert, Conversion};
pub use registry::TileRegistry;
pub use render::{encode_atlas, load_slab, Atlas, AtlasAssembler, MapFile, MapSerializer};
pub use types::{GridSize, PixelFormat, Slab, TileIndex, TileSize, MAX_TILES};
