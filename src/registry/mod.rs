//! Tile registry for deduplicating extracted cells.
//!
//! Tiles are identified purely by their content bytes. Each distinct tile
//! gets its index the moment it is first inserted, so indices are dense,
//! zero-based, and ordered by first appearance in row-major cell order.
//! Both output writers read these indices; neither assigns them.
//!
//! # Example
//!
//! ```ignore
//! use mortimer::registry::TileRegistry;
//!
//! let registry = TileRegistry::from_extractor(&extractor)?;
//! println!("{} distinct tiles", registry.len());
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{MortimerError, Result};
use crate::extract::TileExtractor;
use crate::types::{TileIndex, MAX_TILES};

/// Deduplicated tile store plus the per-cell index sequence.
#[derive(Debug, Default)]
pub struct TileRegistry {
    /// Content -> assigned index.
    lookup: HashMap<Rc<[u8]>, TileIndex>,

    /// Distinct tiles in index order.
    tiles: Vec<Rc<[u8]>>,

    /// One index per cell, row-major.
    cells: Vec<TileIndex>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an extractor to completion, registering every cell.
    pub fn from_extractor(extractor: &TileExtractor<'_>) -> Result<Self> {
        let mut registry = Self::new();
        registry.cells.reserve(extractor.grid().cell_count());
        extractor.for_each_cell(|content| registry.insert(content).map(|_| ()))?;
        Ok(registry)
    }

    /// Register the next cell's content and return its tile index.
    ///
    /// Fails with `CapacityExceeded` when the content would be the 257th distinct tile.
    pub fn insert(&mut self, content: Vec<u8>) -> Result<TileIndex> {
        if let Some(&index) = self.lookup.get(content.as_slice()) {
            self.cells.push(index);
            return Ok(index);
        }

        if let Some(first) = self.tiles.first() {
            if first.len() != content.len() {
                return Err(MortimerError::internal(format!(
                    "tile of {} bytes registered alongside tiles of {} bytes",
                    content.len(),
                    first.len()
                )));
            }
        }

        let index = TileIndex::try_from(self.tiles.len())?;
        let content: Rc<[u8]> = content.into();
        self.tiles.push(Rc::clone(&content));
        self.lookup.insert(content, index);
        self.cells.push(index);

        Ok(index)
    }

    /// Index assigned to a tile with this content, if any.
    pub fn index_of(&self, content: &[u8]) -> Option<TileIndex> {
        self.lookup.get(content).copied()
    }

    /// Content of the tile at an index.
    pub fn tile(&self, index: TileIndex) -> Option<&[u8]> {
        self.tiles.get(index.position()).map(|t| &**t)
    }

    /// Distinct tiles in index order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileIndex, &[u8])> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (TileIndex(i as u8), &**t))
    }

    /// Per-cell tile indices in row-major order.
    pub fn cells(&self) -> &[TileIndex] {
        &self.cells
    }

    /// Number of distinct tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check that assigned indices are exactly `0..len()`.
    pub fn verify(&self) -> Result<()> {
        if self.tiles.len() > MAX_TILES {
            return Err(MortimerError::internal(format!(
                "registry holds {} tiles, limit is {}",
                self.tiles.len(),
                MAX_TILES
            )));
        }

        if self.lookup.len() != self.tiles.len() {
            return Err(MortimerError::internal(format!(
                "registry has {} lookup entries for {} tiles",
                self.lookup.len(),
                self.tiles.len()
            )));
        }

        for (position, content) in self.tiles.iter().enumerate() {
            match self.lookup.get(&**content) {
                Some(index) if index.position() == position => {}
                Some(index) => {
                    return Err(MortimerError::internal(format!(
                        "tile at position {} carries index {}",
                        position, index.0
                    )))
                }
                None => {
                    return Err(MortimerError::internal(format!(
                        "tile at position {} has no index",
                        position
                    )))
                }
            }
        }

        if let Some(bad) = self.cells.iter().find(|i| i.position() >= self.tiles.len()) {
            return Err(MortimerError::internal(format!(
                "cell references index {} but only {} tiles exist",
                bad.0,
                self.tiles.len()
            )));
        }

        Ok(())
    }
}
