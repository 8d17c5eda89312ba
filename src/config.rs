//! Project configuration (mortimer.yaml) parsing.
//!
//! The config file supplies defaults for options the command line leaves
//! unset. Command-line flags always win.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MortimerError, Result};
use crate::types::TileSize;

/// The name of the config file looked up in the current directory.
pub const CONFIG_FILENAME: &str = "mortimer.yaml";

/// Configuration loaded from mortimer.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tile size as "WxH" (e.g. "16x16").
    pub tile: Option<String>,

    /// Reject source images that are not L8, RGB8 or RGBA8 instead of converting them.
    pub strict_format: bool,
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MortimerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| MortimerError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load an explicit config file, or `mortimer.yaml` in `dir` if present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Ok((Self::load(&path)?, Some(path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Resolve the tile size: CLI override, then config, then 16x16.
    pub fn effective_tile_size(&self, cli: Option<TileSize>) -> Result<TileSize> {
        match (cli, &self.tile) {
            (Some(size), _) => Ok(size),
            (None, Some(s)) => s.parse(),
            (None, None) => Ok(TileSize::DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse("tile: 8x16\nstrict_format: true\n").unwrap();

        assert_eq!(config.tile.as_deref(), Some("8x16"));
        assert!(config.strict_format);
        assert_eq!(
            config.effective_tile_size(None).unwrap(),
            TileSize { w: 8, h: 16 }
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_tile_size(None).unwrap(), TileSize::DEFAULT);
    }

    #[test]
    fn test_parse_unknown_field() {
        assert!(matches!(
            Config::parse("tiles: 8x8"),
            Err(MortimerError::Parse { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::parse("tile: 8x8").unwrap();
        let cli = TileSize { w: 32, h: 32 };
        assert_eq!(config.effective_tile_size(Some(cli)).unwrap(), cli);
    }

    #[test]
    fn test_bad_tile_in_config() {
        let config = Config::parse("tile: big").unwrap();
        assert!(config.effective_tile_size(None).is_err());
    }

    #[test]
    fn test_discover_in_directory() {
        let dir = tempdir().unwrap();
        let (config, path) = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_none());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "tile: 4x4").unwrap();
        let (config, path) = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.tile.as_deref(), Some("4x4"));
        assert_eq!(path, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_explicit_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::discover(Some(&missing), dir.path()),
            Err(MortimerError::Io { .. })
        ));
    }
}
