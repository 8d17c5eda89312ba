//! Tile geometry and tile indices.

use std::fmt;
use std::str::FromStr;

use crate::error::{MortimerError, Result};

/// Largest number of distinct tiles a map can address (one byte per cell).
pub const MAX_TILES: usize = 256;

/// Size of one tile in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    pub w: u32,
    pub h: u32,
}

impl TileSize {
    /// Default tile size when neither the CLI nor the config gives one.
    pub const DEFAULT: TileSize = TileSize { w: 16, h: 16 };

    /// Create a tile size, rejecting zero dimensions.
    pub fn new(w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(MortimerError::Parse {
                message: format!("Tile size must be non-zero, got {}x{}", w, h),
                help: Some("Both width and height must be at least 1".to_string()),
            });
        }
        Ok(Self { w, h })
    }

    /// Replace the width and/or height, keeping the other side.
    pub fn with_overrides(self, w: Option<u32>, h: Option<u32>) -> Result<Self> {
        TileSize::new(w.unwrap_or(self.w), h.unwrap_or(self.h))
    }

    /// Number of pixels in one tile.
    pub fn area(&self) -> usize {
        self.w as usize * self.h as usize
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Parse a "WxH" dimension string.
impl FromStr for TileSize {
    type Err = MortimerError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
        if parts.len() != 2 {
            return Err(MortimerError::Parse {
                message: format!("Invalid tile size '{}': expected WxH (e.g. 16x16)", s),
                help: Some("Use the format WxH, for example: 16x16, 8x16".to_string()),
            });
        }

        let w: u32 = parts[0].trim().parse().map_err(|_| MortimerError::Parse {
            message: format!("Invalid width '{}' in tile size '{}'", parts[0], s),
            help: Some("Width must be a positive integer".to_string()),
        })?;

        let h: u32 = parts[1].trim().parse().map_err(|_| MortimerError::Parse {
            message: format!("Invalid height '{}' in tile size '{}'", parts[1], s),
            help: Some("Height must be a positive integer".to_string()),
        })?;

        TileSize::new(w, h)
    }
}

/// Grid dimensions of a slab, measured in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Index of a distinct tile in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex(pub u8);

impl TileIndex {
    /// Position of the tile in the atlas strip.
    pub fn position(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for TileIndex {
    type Error = MortimerError;

    fn try_from(n: usize) -> Result<Self> {
        u8::try_from(n).map(TileIndex).map_err(|_| MortimerError::CapacityExceeded {
            limit: MAX_TILES,
            help: Some("Use a larger tile size or reduce tile variety in the source".to_string()),
        })
    }
}
