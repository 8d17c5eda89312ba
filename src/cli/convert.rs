//! Convert command implementation.
//!
//! Decodes a slab image, deduplicates its tiles and writes the tile map and
//! atlas image. Nothing is written unless the whole conversion succeeds.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{MortimerError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{self, Conversion};
use crate::render::{encode_atlas, format_for_path, load_slab};
use crate::types::TileSize;

/// Convert a slab image into a tile map and atlas
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Slab image to convert
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output path for the binary tile map
    #[arg(required = true)]
    pub map: PathBuf,

    /// Output path for the atlas image (format from extension, e.g. .png)
    #[arg(required = true)]
    pub atlas: PathBuf,

    /// Tile size as WxH (default: 16x16)
    #[arg(long, short)]
    pub tile: Option<TileSize>,

    /// Tile width, overriding only the width of the resolved tile size
    #[arg(long, short = 'w')]
    pub width: Option<u32>,

    /// Tile height, overriding only the height of the resolved tile size
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// Config file (default: ./mortimer.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only report errors
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<Conversion> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = Config::discover(args.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        printer.info("Config", &display_path(path));
    }

    let tile_size = config
        .effective_tile_size(args.tile)?
        .with_overrides(args.width, args.height)?;
    let atlas_format = format_for_path(&args.atlas)?;

    printer.status("Loading", &display_path(&args.input));
    let slab = load_slab(&args.input, config.strict_format)?;
    printer.info(
        "Analyzed",
        &format!("{}x{} {} slab", slab.width(), slab.height(), slab.format()),
    );

    let conversion = pipeline::convert(&slab, tile_size)?;
    let cells = conversion.grid.cell_count();
    printer.info(
        "Slicing",
        &format!(
            "{} grid of {} tiles (at most {})",
            conversion.grid,
            tile_size,
            plural(cells, "distinct tile", "distinct tiles")
        ),
    );
    printer.info(
        "Found",
        &plural(conversion.tile_count(), "distinct tile", "distinct tiles"),
    );

    let atlas_bytes = encode_atlas(&conversion.atlas, atlas_format)?;

    write_outputs(&[
        (args.map.as_path(), conversion.map.as_slice()),
        (args.atlas.as_path(), atlas_bytes.as_slice()),
    ])?;

    printer.status(
        "Writing",
        &format!("{} ({} bytes)", display_path(&args.map), conversion.map.len()),
    );
    printer.status(
        "Writing",
        &format!(
            "{} ({}x{})",
            display_path(&args.atlas),
            conversion.atlas.width(),
            conversion.atlas.height()
        ),
    );
    printer.status(
        "Finished",
        &format!(
            "success: {} -> {}",
            plural(cells, "cell", "cells"),
            plural(conversion.tile_count(), "tile", "tiles")
        ),
    );

    Ok(conversion)
}

/// Stage every output in a temporary file next to its destination, then
/// move them all into place.
///
/// Destinations are checked before anything is moved. If a move still fails,
/// outputs already moved are restored to their previous contents (or removed).
fn write_outputs(outputs: &[(&Path, &[u8])]) -> Result<()> {
    for &(path, _) in outputs {
        if path.is_dir() {
            return Err(MortimerError::Io {
                path: path.to_path_buf(),
                message: "Output path is a directory".to_string(),
            });
        }
    }

    let mut staged: Vec<(NamedTempFile, &Path)> = Vec::with_capacity(outputs.len());

    for &(path, bytes) in outputs {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| MortimerError::Io {
                path: dir.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        let mut file = NamedTempFile::new_in(dir).map_err(|e| MortimerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to create temporary file: {}", e),
        })?;
        file.write_all(bytes).map_err(|e| MortimerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write output: {}", e),
        })?;

        staged.push((file, path));
    }

    let mut persisted: Vec<(&Path, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());

    for (file, path) in staged {
        let previous = if path.is_file() {
            match fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    restore(&persisted);
                    return Err(MortimerError::Io {
                        path: path.to_path_buf(),
                        message: format!("Failed to read existing output: {}", e),
                    });
                }
            }
        } else {
            None
        };

        if let Err(e) = file.persist(path) {
            restore(&persisted);
            return Err(MortimerError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to move output into place: {}", e.error),
            });
        }

        persisted.push((path, previous));
    }

    Ok(())
}

/// Undo persisted outputs, newest first. Best effort: the original error wins.
fn restore(persisted: &[(&Path, Option<Vec<u8>>)]) {
    for (path, previous) in persisted.iter().rev() {
        let _ = match previous {
            Some(bytes) => fs::write(path, bytes),
            None => fs::remove_file(path),
        };
    }
}
