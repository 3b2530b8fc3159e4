//! Game configuration, loadable from TOML.
//!
//! ```
//! use hexmatch_core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     rows = 5
//!     columns = 6
//!     seed = 42
//!
//!     [[palette]]
//!     id = 0
//!     kind = "fixed_count"
//!     target = 30
//!
//!     [[palette]]
//!     id = 1
//!     kind = "free_count"
//! "#).unwrap();
//!
//! assert_eq!(config.cell_count(), 30);
//! assert_eq!(config.palette.len(), 2);
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::palette::{ColorSpec, Palette};
use crate::types::{
    DEFAULT_COLORIZE_ATTEMPTS, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_SEED, POINTS_PER_CELL,
};

/// Colors in the default palette
const DEFAULT_PALETTE_SIZE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u16,
    pub columns: u16,
    pub points_per_cell: u32,
    /// Full colorization passes tried before a start fails
    pub max_colorize_attempts: u32,
    pub seed: u64,
    /// Cell width in world units, used for selection geometry
    pub cell_width: f32,
    pub palette: Vec<ColorSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            points_per_cell: POINTS_PER_CELL,
            max_colorize_attempts: DEFAULT_COLORIZE_ATTEMPTS,
            seed: DEFAULT_SEED,
            cell_width: crate::types::DEFAULT_CELL_WIDTH,
            palette: (0..DEFAULT_PALETTE_SIZE).map(ColorSpec::free).collect(),
        }
    }
}

impl GameConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::Validation(
                "rows and columns must be > 0".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Validation("palette must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for spec in &self.palette {
            if !seen.insert(spec.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate palette id {}",
                    spec.id.0
                )));
            }
        }
        if self.max_colorize_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_colorize_attempts must be > 0".into(),
            ));
        }
        if self.cell_width.is_nan() || self.cell_width <= 0.0 {
            return Err(ConfigError::Validation("cell_width must be > 0".into()));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Fresh palette with zeroed usage counters
    pub fn build_palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }
}
