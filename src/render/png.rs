//! Image decoding and encoding at the edges of the pipeline.
//!
//! Decoding produces a [`Slab`]; encoding turns an [`Atlas`] back into image
//! file bytes in the same pixel format. Both go through the `image` crate.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::error::{MortimerError, Result};
use crate::types::{PixelFormat, Slab};

use super::Atlas;

/// Decode an image file into a slab.
///
/// L8, RGB8 and RGBA8 images are kept as-is. Anything else is converted to
/// RGBA8, or rejected when `strict` is set.
pub fn load_slab(path: &Path, strict: bool) -> Result<Slab> {
    let img = image::open(path).map_err(|e| MortimerError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to load image: {}", e),
    })?;

    slab_from_image(img, strict)
}

/// Convert a decoded image into a slab.
pub fn slab_from_image(img: DynamicImage, strict: bool) -> Result<Slab> {
    let (width, height) = (img.width(), img.height());

    let (pixels, format) = match img {
        DynamicImage::ImageLuma8(buf) => (buf.into_raw(), PixelFormat::Luma8),
        DynamicImage::ImageRgb8(buf) => (buf.into_raw(), PixelFormat::Rgb8),
        DynamicImage::ImageRgba8(buf) => (buf.into_raw(), PixelFormat::Rgba8),
        other if strict => {
            return Err(MortimerError::input(
                format!("Unsupported pixel format {:?}", other.color()),
                "Supported formats are L8, RGB8 and RGBA8; disable strict_format to convert",
            ));
        }
        other => (other.to_rgba8().into_raw(), PixelFormat::Rgba8),
    };

    Slab::new(pixels, width, height, format)
}

/// Encode an atlas into image file bytes.
pub fn encode_atlas(atlas: &Atlas, format: ImageFormat) -> Result<Vec<u8>> {
    let (w, h) = (atlas.width(), atlas.height());
    let raw = atlas.pixels().to_vec();

    let img = match atlas.format() {
        PixelFormat::Luma8 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        PixelFormat::Rgb8 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
    }
    .ok_or_else(|| {
        MortimerError::internal(format!(
            "atlas buffer of {} bytes does not fill a {}x{} {} image",
            atlas.pixels().len(),
            w,
            h,
            atlas.format()
        ))
    })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| MortimerError::Build {
            message: format!("Failed to encode atlas as {:?}: {}", format, e),
            help: Some("PNG supports every pixel format mortimer produces".to_string()),
        })?;

    Ok(bytes)
}

/// Image format implied by an output path's extension.
pub fn format_for_path(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path).map_err(|_| MortimerError::Parse {
        message: format!("Cannot infer an image format from '{}'", path.display()),
        help: Some("Give the atlas output a known extension such as .png".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TileRegistry;
    use crate::render::AtlasAssembler;
    use crate::types::{TileIndex, TileSize};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_rgb_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slab.png");
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let slab = load_slab(&path, false).unwrap();

        assert_eq!(slab.format(), PixelFormat::Rgb8);
        assert_eq!((slab.width(), slab.height()), (2, 1));
        assert_eq!(slab.pixels(), &[255u8, 0, 0, 0, 0, 255][..]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_slab(&dir.path().join("nope.png"), false);
        assert!(matches!(result, Err(MortimerError::Io { .. })));
    }

    #[test]
    fn test_other_formats_converted_to_rgba() {
        let img = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(
            2,
            2,
            image::LumaA([10, 200]),
        ));
        let slab = slab_from_image(img, false).unwrap();

        assert_eq!(slab.format(), PixelFormat::Rgba8);
        assert_eq!(&slab.pixels()[0..4], &[10u8, 10, 10, 200][..]);
    }

    #[test]
    fn test_strict_rejects_other_formats() {
        let img = DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(2, 2));
        assert!(matches!(
            slab_from_image(img, true),
            Err(MortimerError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_encode_atlas_round_trip() {
        let mut registry = TileRegistry::new();
        registry.insert(vec![0, 50, 100, 150]).unwrap();
        registry.insert(vec![255, 1, 2, 3]).unwrap();
        let atlas = AtlasAssembler::new(TileSize { w: 2, h: 2 }, PixelFormat::Luma8)
            .assemble(&registry)
            .unwrap();

        let bytes = encode_atlas(&atlas, ImageFormat::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (2, 4));
        let slab = slab_from_image(decoded, true).unwrap();
        assert_eq!(slab.format(), PixelFormat::Luma8);
        assert_eq!(slab.pixels(), atlas.pixels());
        assert_eq!(atlas.tile(TileIndex(1)), Some(&[255u8, 1, 2, 3][..]));
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path(Path::new("atlas.png")).unwrap(), ImageFormat::Png);
        assert!(format_for_path(Path::new("atlas.unknown")).is_err());
    }
}
