//! Inspect command implementation.
//!
//! Reads a tile map and reports its header and tile usage.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{MortimerError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::MapFile;

/// Show the header and tile usage of a map file
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Map file to inspect
    #[arg(required = true)]
    pub map: PathBuf,

    /// Print a JSON summary on stdout
    #[arg(long)]
    pub json: bool,
}

/// Summary of a map file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub version: u8,
    pub width: u16,
    pub height: u16,
    pub cells: usize,
    pub distinct_tiles: usize,
    pub max_index: Option<u8>,
}

impl From<&MapFile> for MapSummary {
    fn from(map: &MapFile) -> Self {
        Self {
            version: map.version,
            width: map.width,
            height: map.height,
            cells: map.cells.len(),
            distinct_tiles: map.distinct_count(),
            max_index: map.cells.iter().copied().max(),
        }
    }
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<MapSummary> {
    let bytes = fs::read(&args.map).map_err(|e| MortimerError::Io {
        path: args.map.clone(),
        message: format!("Failed to read map: {}", e),
    })?;

    let map = MapFile::parse(&bytes)?;
    let summary = MapSummary::from(&map);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| MortimerError::Build {
            message: format!("Failed to serialize map summary: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        printer.info("Map", &display_path(&args.map));
        printer.info("Version", &summary.version.to_string());
        printer.info(
            "Grid",
            &format!(
                "{}x{} ({})",
                summary.width,
                summary.height,
                plural(summary.cells, "cell", "cells")
            ),
        );
        printer.info(
            "Tiles",
            &plural(summary.distinct_tiles, "distinct tile", "distinct tiles"),
        );
        // Dense indexing means the highest index is count - 1
        if let Some(max) = summary.max_index {
            if max as usize + 1 != summary.distinct_tiles {
                printer.warning(
                    "Warning",
                    &format!(
                        "highest index is {} but only {} are used",
                        max,
                        plural(summary.distinct_tiles, "tile", "tiles")
                    ),
                );
            }
        }
    }

    Ok(summary)
}
