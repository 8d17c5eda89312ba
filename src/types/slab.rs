//! The source slab: one raster image laid out as full scanlines.

use std::fmt;

use crate::error::{MortimerError, Result};

use super::{GridSize, TileSize};

/// Pixel layout of a slab. Every format is treated as opaque fixed-width pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One byte per pixel. Indexed sources arrive here or as RGB(A) after expansion.
    Luma8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Luma8 => write!(f, "L8"),
            PixelFormat::Rgb8 => write!(f, "RGB8"),
            PixelFormat::Rgba8 => write!(f, "RGBA8"),
        }
    }
}

/// A decoded slab image.
///
/// `pixels` holds `height` scanlines of `width` pixels each, interleaved
/// channels, with no row padding.
#[derive(Debug, Clone)]
pub struct Slab {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Slab {
    /// Wrap a pixel buffer, checking its length against the dimensions.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MortimerError::input(
                format!("Slab has zero dimensions ({}x{})", width, height),
                "Input image must have non-zero width and height",
            ));
        }

        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(MortimerError::input(
                format!(
                    "Pixel buffer is {} bytes, expected {} for a {}x{} {} slab",
                    pixels.len(),
                    expected,
                    width,
                    height,
                    format
                ),
                "The decoder must report dimensions matching the buffer it produced",
            ));
        }

        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Grid dimensions for a tile size, failing if the tiles don't fit evenly.
    pub fn grid(&self, tile_size: TileSize) -> Result<GridSize> {
        if tile_size.w == 0 || tile_size.h == 0 {
            return Err(MortimerError::input(
                format!("Tile size {} has a zero dimension", tile_size),
                "Both tile width and height must be at least 1",
            ));
        }

        if self.width % tile_size.w != 0 || self.height % tile_size.h != 0 {
            return Err(MortimerError::input(
                format!(
                    "Slab {}x{} is not evenly divisible into {} tiles",
                    self.width, self.height, tile_size
                ),
                "Slab width and height must be multiples of the tile width and height",
            ));
        }

        Ok(GridSize {
            width: self.width / tile_size.w,
            height: self.height / tile_size.h,
        })
    }
}
