//! Core game logic module - pure, deterministic, and testable
//!
//! This crate owns the logical state of a hexagonal match-3 board and every rule
//! that mutates it. It has no dependencies on rendering, timing, or input capture:
//!
//! - **Deterministic**: the same seed and the same gestures replay the same game
//! - **Testable**: every rule is a plain synchronous function over a [`Board`]
//! - **Portable**: presentation layers consume ordered [`BoardEvent`]s and pace them
//!
//! # Module Structure
//!
//! - [`adjacency`]: offset-hex neighbor table, the single source of adjacency truth
//! - [`board`]: fixed-size cell storage with swap/deactivate/reactivate primitives
//! - [`palette`]: color buckets and the assignment policy used when painting cells
//! - [`matcher`]: run detection and the possible-move count behind game over
//! - [`layout`]: hex geometry for slot centers and vertex points
//! - [`selection`]: maps a point on a cell to the three-cell group it selects
//! - [`cascade`]: the match → clear → fall → refill state machine
//! - [`scoring`]: points for cleared cells
//! - [`rng`]: seeded color draws
//! - [`snapshot`]: serializable view of the board for observers
//! - [`config`]: TOML-loadable game configuration
//!
//! # Example
//!
//! ```
//! use hexmatch_core::{Cascade, GameConfig};
//!
//! let config = GameConfig::default();
//! let mut cascade = Cascade::new(&config);
//! cascade.generate();
//! cascade.colorize_with_retries(config.max_colorize_attempts).unwrap();
//!
//! // A freshly colorized board never contains a ready-made run.
//! assert_eq!(cascade.score_pass().cells_cleared, 0);
//! ```

pub mod adjacency;
pub mod board;
pub mod cascade;
pub mod config;
pub mod error;
pub mod layout;
pub mod matcher;
pub mod palette;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod snapshot;

pub use hexmatch_types as types;

// Re-export commonly used types for convenience
pub use adjacency::{neighbor, neighbors, Neighbor};
pub use board::{Board, Cell};
pub use cascade::{BoardEvent, Cascade, CascadeReport, GestureOutcome, PauseKind, Phase};
pub use config::GameConfig;
pub use error::{ColorizeError, ConfigError, SelectionError};
pub use layout::HexLayout;
pub use matcher::{possible_move_count, runs_through, total_possible_moves, Run};
pub use palette::{ColorSpec, Palette};
pub use rng::BoardRng;
pub use scoring::ScoreResult;
pub use selection::SelectionResult;
pub use snapshot::GameSnapshot;
