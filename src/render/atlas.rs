//! Atlas assembly.
//!
//! Stacks every distinct tile once, in index order, into a vertical strip
//! one tile wide: tile `i` occupies pixel rows `i*h .. (i+1)*h`.

use crate::error::{MortimerError, Result};
use crate::registry::TileRegistry;
use crate::types::{PixelFormat, TileIndex, TileSize};

/// An assembled atlas pixel buffer.
#[derive(Debug, Clone)]
pub struct Atlas {
    pixels: Vec<u8>,
    tile_size: TileSize,
    tile_count: usize,
    format: PixelFormat,
}

impl Atlas {
    /// Atlas width in pixels (one tile).
    pub fn width(&self) -> u32 {
        self.tile_size.w
    }

    /// Atlas height in pixels (one tile per distinct tile).
    pub fn height(&self) -> u32 {
        self.tile_size.h * self.tile_count as u32
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Pixel content of the tile at an index.
    pub fn tile(&self, index: TileIndex) -> Option<&[u8]> {
        let len = self.tile_size.area() * self.format.bytes_per_pixel();
        let start = index.position() * len;
        self.pixels.get(start..start + len)
    }
}

/// Builds the atlas strip from a fully indexed registry.
pub struct AtlasAssembler {
    tile_size: TileSize,
    format: PixelFormat,
}

impl AtlasAssembler {
    pub fn new(tile_size: TileSize, format: PixelFormat) -> Self {
        Self { tile_size, format }
    }

    /// Concatenate the registry's tiles in index order.
    pub fn assemble(&self, registry: &TileRegistry) -> Result<Atlas> {
        let tile_len = self.tile_size.area() * self.format.bytes_per_pixel();

        let mut ordered: Vec<(TileIndex, &[u8])> = registry.tiles().collect();
        ordered.sort_by_key(|(index, _)| *index);

        let n = ordered.len();
        match (ordered.first(), ordered.last()) {
            (Some((first, _)), Some((last, _))) => {
                if first.position() != 0 || last.position() != n - 1 {
                    return Err(MortimerError::internal(format!(
                        "atlas indices span {}..={} for {} tiles, expected 0..={}",
                        first.0,
                        last.0,
                        n,
                        n - 1
                    )));
                }
            }
            _ => return Err(MortimerError::internal("atlas has no tile with index 0")),
        }

        if let Some(pair) = ordered.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(MortimerError::internal(format!(
                "index {} assigned to more than one tile",
                pair[0].0 .0
            )));
        }

        let mut pixels = Vec::with_capacity(tile_len * n);
        for (index, content) in &ordered {
            if content.len() != tile_len {
                return Err(MortimerError::internal(format!(
                    "tile {} is {} bytes, expected {}",
                    index.0,
                    content.len(),
                    tile_len
                )));
            }
            pixels.extend_from_slice(content);
        }

        if pixels.len() != tile_len * n {
            return Err(MortimerError::internal(format!(
                "atlas buffer is {} bytes, expected {} ({} tiles)",
                pixels.len(),
                tile_len * n,
                n
            )));
        }

        Ok(Atlas {
            pixels,
            tile_size: self.tile_size,
            tile_count: n,
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_in_index_order() {
        let mut registry = TileRegistry::new();
        registry.insert(vec![3, 3, 3, 3]).unwrap();
        registry.insert(vec![1, 1, 1, 1]).unwrap();
        registry.insert(vec![3, 3, 3, 3]).unwrap();

        let atlas = AtlasAssembler::new(TileSize { w: 2, h: 2 }, PixelFormat::Luma8)
            .assemble(&registry)
            .unwrap();

        assert_eq!(atlas.width(), 2);
        assert_eq!(atlas.height(), 4);
        assert_eq!(atlas.tile_count(), 2);
        assert_eq!(atlas.pixels(), &[3u8, 3, 3, 3, 1, 1, 1, 1][..]);
        assert_eq!(atlas.tile(TileIndex(1)), Some(&[1u8, 1, 1, 1][..]));
        assert_eq!(atlas.tile(TileIndex(2)), None);
    }

    #[test]
    fn test_assemble_empty_registry_is_internal_error() {
        let registry = TileRegistry::new();
        let result = AtlasAssembler::new(TileSize { w: 2, h: 2 }, PixelFormat::Luma8)
            .assemble(&registry);
        assert!(matches!(result, Err(MortimerError::InternalConsistency { .. })));
    }

    #[test]
    fn test_assemble_wrong_tile_length_is_internal_error() {
        let mut registry = TileRegistry::new();
        registry.insert(vec![0; 12]).unwrap();

        // Tiles are RGB but the assembler is told Luma8
        let result = AtlasAssembler::new(TileSize { w: 2, h: 2 }, PixelFormat::Luma8)
            .assemble(&registry);
        assert!(matches!(result, Err(MortimerError::InternalConsistency { .. })));
    }

    #[test]
    fn test_atlas_length_matches_tiles() {
        let mut registry = TileRegistry::new();
        for i in 0..5u8 {
            registry.insert(vec![i; 2 * 3 * 4]).unwrap();
        }

        let atlas = AtlasAssembler::new(TileSize { w: 2, h: 3 }, PixelFormat::Rgba8)
            .assemble(&registry)
            .unwrap();

        assert_eq!(atlas.pixels().len(), 4 * 2 * 3 * 5);
        assert_eq!(atlas.height(), 15);
    }
}
