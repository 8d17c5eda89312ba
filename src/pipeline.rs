//! The in-memory conversion pipeline.
//!
//! Slab -> extractor -> registry -> {map, atlas}. Every invariant is checked
//! here, so by the time a caller writes files both artifacts are known good.

use crate::error::Result;
use crate::extract::TileExtractor;
use crate::registry::TileRegistry;
use crate::render::{Atlas, AtlasAssembler, MapSerializer};
use crate::types::{GridSize, Slab, TileSize};

/// Result of converting one slab.
#[derive(Debug)]
pub struct Conversion {
    /// Grid dimensions in tiles.
    pub grid: GridSize,

    /// Encoded map file bytes.
    pub map: Vec<u8>,

    /// Assembled atlas pixels.
    pub atlas: Atlas,
}

impl Conversion {
    /// Number of distinct tiles in the atlas.
    pub fn tile_count(&self) -> usize {
        self.atlas.tile_count()
    }
}

/// Convert a slab into a tile map and atlas.
pub fn convert(slab: &Slab, tile_size: TileSize) -> Result<Conversion> {
    let extractor = TileExtractor::new(slab, tile_size)?;
    let grid = extractor.grid();

    let registry = TileRegistry::from_extractor(&extractor)?;
    registry.verify()?;

    let map = MapSerializer::new().encode(grid, registry.cells())?;
    let atlas = AtlasAssembler::new(tile_size, slab.format()).assemble(&registry)?;

    Ok(Conversion { grid, map, atlas })
}
