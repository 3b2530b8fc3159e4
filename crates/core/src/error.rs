use std::path::PathBuf;

use crate::types::GridPosition;

/// Errors that can occur while painting the whole board.
///
/// All of them are recoverable: the board is left unpainted and the caller may
/// run another pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorizeError {
    #[error(
        "palette cannot cover {cells} cells: fixed capacity {fixed_capacity}, \
         {free_colors} free colors (need at least 3)"
    )]
    InsufficientPalette {
        fixed_capacity: u32,
        cells: usize,
        free_colors: usize,
    },

    #[error("no palette color can be placed at {position}")]
    Exhausted { position: GridPosition },

    #[error("colorization failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Errors that can occur when resolving a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection anchor {position} is outside the board")]
    OutOfBounds { position: GridPosition },

    #[error("cell {anchor} has no pair of adjacent neighbors")]
    Isolated { anchor: GridPosition },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_error_display() {
        let err = ColorizeError::InsufficientPalette {
            fixed_capacity: 10,
            cells: 72,
            free_colors: 1,
        };
        assert_eq!(
            err.to_string(),
            "palette cannot cover 72 cells: fixed capacity 10, 1 free colors (need at least 3)"
        );

        let err = ColorizeError::Exhausted {
            position: GridPosition::new(2, 5),
        };
        assert_eq!(err.to_string(), "no palette color can be placed at [2, 5]");
    }

    #[test]
    fn test_selection_error_display() {
        let err = SelectionError::Isolated {
            anchor: GridPosition::new(0, 0),
        };
        assert_eq!(err.to_string(), "cell [0, 0] has no pair of adjacent neighbors");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("rows must be > 0".to_string());
        assert_eq!(err.to_string(), "config validation error: rows must be > 0");
    }
}
