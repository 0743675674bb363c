//! TOML configuration file support for recurring grid setups.
//!
//! Instead of repeating shape flags on every invocation, users can keep
//! the sensor-grid layout of a room in a config file:
//!
//! ```toml
//! # room_south.toml
//! [grid]
//! height = 81
//! width = 35
//! bias = 1
//! strict = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for luxgrid config files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Grid-shape settings.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Grid defaults consumed by the stats and render commands.
#[derive(Debug, Default, Deserialize)]
pub struct GridConfig {
    /// Sensor points per scan column.
    pub height: Option<usize>,

    /// Number of scan columns.
    pub width: Option<usize>,

    /// Trailing points per column excluded from the grid.
    pub bias: Option<usize>,

    /// Require inputs to fill the grid exactly.
    pub strict: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
