//! Binary tile map encoding and decoding.
//!
//! Layout (all multi-byte fields big-endian):
//!
//! | offset | size | meaning |
//! |--------|------|---------|
//! | 0      | 3    | magic `MAP` |
//! | 3      | 1    | format version |
//! | 4      | 2    | width in tiles |
//! | 6      | 2    | height in tiles |
//! | 8      | w*h  | one tile index per cell, row-major |

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::{MortimerError, Result};
use crate::types::{GridSize, TileIndex};

/// Magic bytes at the start of every map file.
pub const MAP_MAGIC: &[u8; 3] = b"MAP";

/// Current map format version.
pub const MAP_VERSION: u8 = 1;

/// Size of the fixed header.
pub const MAP_HEADER_LEN: usize = 8;

/// Encodes grid dimensions and cell indices into the map format.
///
/// Always writes [`MAP_VERSION`]: version 1 is the only defined layout, and
/// [`MapFile::parse`] rejects any other.
#[derive(Debug, Clone, Copy)]
pub struct MapSerializer {
    version: u8,
}

impl Default for MapSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSerializer {
    /// A serializer for the current format version.
    pub fn new() -> Self {
        Self {
            version: MAP_VERSION,
        }
    }

    /// Encode a map into a byte buffer of length `8 + width * height`.
    pub fn encode(&self, grid: GridSize, cells: &[TileIndex]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(MAP_HEADER_LEN + cells.len());
        self.write(&mut out, grid, cells)?;
        Ok(out)
    }

    /// Stream a map into a writer.
    pub fn write<W: Write>(&self, out: &mut W, grid: GridSize, cells: &[TileIndex]) -> Result<()> {
        let width = header_dimension("width", grid.width)?;
        let height = header_dimension("height", grid.height)?;

        if cells.len() != grid.cell_count() {
            return Err(MortimerError::internal(format!(
                "map has {} cells for a {} grid, expected {}",
                cells.len(),
                grid,
                grid.cell_count()
            )));
        }

        out.write_all(MAP_MAGIC)?;
        out.write_all(&[self.version])?;
        out.write_all(&width.to_be_bytes())?;
        out.write_all(&height.to_be_bytes())?;

        let body: Vec<u8> = cells.iter().map(|i| i.0).collect();
        out.write_all(&body)?;

        Ok(())
    }
}

fn header_dimension(name: &str, tiles: u32) -> Result<u16> {
    u16::try_from(tiles).map_err(|_| {
        MortimerError::input(
            format!("Map {} of {} tiles does not fit the 16-bit header field", name, tiles),
            "Use a larger tile size or split the slab",
        )
    })
}

/// A decoded map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    pub version: u8,
    pub width: u16,
    pub height: u16,
    pub cells: Vec<u8>,
}

impl MapFile {
    /// Parse a map file from its bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MAP_HEADER_LEN {
            return Err(MortimerError::Parse {
                message: format!(
                    "Map is {} bytes, shorter than the {}-byte header",
                    bytes.len(),
                    MAP_HEADER_LEN
                ),
                help: None,
            });
        }

        if bytes[0..3] != MAP_MAGIC[..] {
            return Err(MortimerError::Parse {
                message: "Missing MAP magic bytes".to_string(),
                help: Some("Is this a map produced by mortimer?".to_string()),
            });
        }

        let version = bytes[3];
        if version != MAP_VERSION {
            return Err(MortimerError::Parse {
                message: format!("Unsupported map version {}", version),
                help: Some(format!("Only version {} is supported", MAP_VERSION)),
            });
        }

        let width = u16::from_be_bytes([bytes[4], bytes[5]]);
        let height = u16::from_be_bytes([bytes[6], bytes[7]]);
        let body = &bytes[MAP_HEADER_LEN..];
        let expected = width as usize * height as usize;

        if body.len() != expected {
            return Err(MortimerError::Parse {
                message: format!(
                    "Map body is {} bytes, expected {} for a {}x{} grid",
                    body.len(),
                    expected,
                    width,
                    height
                ),
                help: None,
            });
        }

        Ok(Self {
            version,
            width,
            height,
            cells: body.to_vec(),
        })
    }

    /// Tile index at a grid position.
    pub fn cell(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Number of distinct indices referenced by the map.
    pub fn distinct_count(&self) -> usize {
        self.cells.iter().collect::<BTreeSet<_>>().len()
    }
}
