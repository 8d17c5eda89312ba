//! Tile extraction.
//!
//! A slab is stored as full scanlines, so the rows of one tile are spread
//! across the buffer, interleaved with the rows of every other tile in the
//! same tile-row band. Extraction walks one band at a time: each scanline of
//! the band is split into tile-width runs, and run `i` is appended to the
//! buffer of tile-column `i % columns`. Once the band's scanlines are
//! exhausted every column buffer holds one complete tile.

use crate::error::{MortimerError, Result};
use crate::types::{GridSize, Slab, TileSize};

/// Splits a slab into per-cell content buffers in row-major order.
pub struct TileExtractor<'a> {
    slab: &'a Slab,
    tile_size: TileSize,
    grid: GridSize,
}

impl<'a> TileExtractor<'a> {
    /// Create an extractor, failing if the tile size does not evenly divide the slab.
    pub fn new(slab: &'a Slab, tile_size: TileSize) -> Result<Self> {
        let grid = slab.grid(tile_size)?;
        Ok(Self {
            slab,
            tile_size,
            grid,
        })
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Length in bytes of one extracted tile.
    pub fn tile_len(&self) -> usize {
        self.tile_size.area() * self.slab.bytes_per_pixel()
    }

    /// Visit every cell's content in row-major order (tile-row 0 left to right, then row 1...).
    ///
    /// Each input byte is copied exactly once.
    pub fn for_each_cell<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Vec<u8>) -> Result<()>,
    {
        let columns = self.grid.width as usize;
        let tile_len = self.tile_len();
        let run_len = self.slab.bytes_per_pixel() * self.tile_size.w as usize;
        let band_len = run_len * columns * self.tile_size.h as usize;
        let expected = self.grid.cell_count() * tile_len;

        let pixels = self.slab.pixels();
        let mut consumed = 0usize;

        for band in pixels.chunks_exact(band_len) {
            let mut tiles: Vec<Vec<u8>> =
                (0..columns).map(|_| Vec::with_capacity(tile_len)).collect();

            for (i, run) in band.chunks_exact(run_len).enumerate() {
                tiles[i % columns].extend_from_slice(run);
            }
            consumed += band.len();

            for tile in tiles {
                if tile.len() != tile_len {
                    return Err(MortimerError::internal(format!(
                        "extracted tile is {} bytes, expected {}",
                        tile.len(),
                        tile_len
                    )));
                }
                visit(tile)?;
            }
        }

        if consumed != expected || consumed != pixels.len() {
            return Err(MortimerError::internal(format!(
                "consumed {} of {} slab bytes, expected {}",
                consumed,
                pixels.len(),
                expected
            )));
        }

        Ok(())
    }

    /// Collect every cell's content in row-major order.
    pub fn extract(&self) -> Result<Vec<Vec<u8>>> {
        let mut cells = Vec::with_capacity(self.grid.cell_count());
        self.for_each_cell(|tile| {
            cells.push(tile);
            Ok(())
        })?;
        Ok(cells)
    }
}
