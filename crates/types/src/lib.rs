//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, so they can be used by
//! the simulation core, the session driver, and any presentation layer alike.
//!
//! # Board Dimensions
//!
//! The default board is a staggered ("offset") hex grid:
//!
//! - **Rows**: 9 (indexed 0-8, top to bottom)
//! - **Columns**: 8 (indexed 0-7, left to right)
//! - Odd columns sit half a cell lower than even columns
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 9 | Rows on the default board |
//! | `DEFAULT_COLUMNS` | 8 | Columns on the default board |
//! | `POINTS_PER_CELL` | 5 | Score awarded for every cleared cell |
//! | `MAX_ROTATION_ATTEMPTS` | 3 | Rotations tried per gesture before giving up |
//! | `DEFAULT_COLORIZE_ATTEMPTS` | 1000 | Full colorization passes tried before failing |
//!
//! # Examples
//!
//! ```
//! use hexmatch_types::{GridPosition, NeighborDirection, VertexDirection};
//!
//! let pos = GridPosition::new(2, 3);
//! assert_eq!(pos.index(8), 2 * 8 + 3);
//!
//! assert_eq!(NeighborDirection::North.next(), NeighborDirection::NorthEast);
//! assert_eq!(NeighborDirection::North.opposite(), NeighborDirection::South);
//!
//! assert_eq!(
//!     VertexDirection::East.neighbor_pair(),
//!     (NeighborDirection::NorthEast, NeighborDirection::SouthEast)
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rows on the default board
pub const DEFAULT_ROWS: u16 = 9;

/// Columns on the default board
pub const DEFAULT_COLUMNS: u16 = 8;

/// Score awarded for every cleared cell
pub const POINTS_PER_CELL: u32 = 5;

/// Number of rotations a single swipe gesture may try before it is abandoned.
///
/// Three rotations of a three-cell group is the identity, so an abandoned
/// gesture always leaves the board as it found it.
pub const MAX_ROTATION_ATTEMPTS: u8 = 3;

/// Full colorization passes tried before a session start gives up
pub const DEFAULT_COLORIZE_ATTEMPTS: u32 = 1000;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 1;

/// Width of a hex cell in world units before scaling
pub const DEFAULT_CELL_WIDTH: f32 = 1.0;

/// Immutable identity of a board slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub column: i32,
}

impl GridPosition {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Flat, row-major index on a board with `columns` columns.
    ///
    /// The caller is responsible for the position being in range.
    #[inline]
    pub fn index(&self, columns: u16) -> usize {
        (self.row as usize) * (columns as usize) + (self.column as usize)
    }

    /// Check if this position lies on a `rows x columns` board
    #[inline]
    pub fn in_bounds(&self, rows: u16, columns: u16) -> bool {
        self.row >= 0 && self.column >= 0 && self.row < rows as i32 && self.column < columns as i32
    }

    /// Position shifted by `(d_row, d_column)`; no bounds check
    #[inline]
    pub fn offset(&self, d_row: i32, d_column: i32) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    /// Whether the column is even; adjacency depends on this parity
    #[inline]
    pub fn is_even_column(&self) -> bool {
        self.column % 2 == 0
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.column)
    }
}

/// Identifier of a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u8);

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color#{}", self.0)
    }
}

/// How a palette color is budgeted during colorization
///
/// - **FixedCount**: may be placed at most `target` times per full pass
/// - **FreeCount**: unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKind {
    FixedCount,
    FreeCount,
}

/// The six neighbors of a hex cell in their fixed cyclic order
///
/// The cycle goes: North → NorthEast → SouthEast → South → SouthWest → NorthWest → North.
/// Two cyclically consecutive neighbors are always adjacent to each other, which is
/// what makes "previous/next" meaningful for run detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborDirection {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl NeighborDirection {
    /// All directions in cyclic order
    pub const ALL: [NeighborDirection; 6] = [
        NeighborDirection::North,
        NeighborDirection::NorthEast,
        NeighborDirection::SouthEast,
        NeighborDirection::South,
        NeighborDirection::SouthWest,
        NeighborDirection::NorthWest,
    ];

    /// Position of this direction in the cyclic order (0-5)
    pub fn index(&self) -> usize {
        match self {
            NeighborDirection::North => 0,
            NeighborDirection::NorthEast => 1,
            NeighborDirection::SouthEast => 2,
            NeighborDirection::South => 3,
            NeighborDirection::SouthWest => 4,
            NeighborDirection::NorthWest => 5,
        }
    }

    /// Direction at `index` (taken modulo 6)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Next direction clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use hexmatch_types::NeighborDirection;
    ///
    /// assert_eq!(NeighborDirection::NorthWest.next(), NeighborDirection::North);
    /// ```
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous direction clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use hexmatch_types::NeighborDirection;
    ///
    /// assert_eq!(NeighborDirection::North.previous(), NeighborDirection::NorthWest);
    /// ```
    pub fn previous(&self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Direction pointing back at the origin cell
    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// The six vertices (corners) of a flat-top hex cell
///
/// Each vertex is shared by the cell and two of its neighbors, so picking a vertex
/// picks a group of three mutually adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexDirection {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl VertexDirection {
    /// All vertices in cyclic order
    pub const ALL: [VertexDirection; 6] = [
        VertexDirection::NorthEast,
        VertexDirection::East,
        VertexDirection::SouthEast,
        VertexDirection::SouthWest,
        VertexDirection::West,
        VertexDirection::NorthWest,
    ];

    pub fn index(&self) -> usize {
        match self {
            VertexDirection::NorthEast => 0,
            VertexDirection::East => 1,
            VertexDirection::SouthEast => 2,
            VertexDirection::SouthWest => 3,
            VertexDirection::West => 4,
            VertexDirection::NorthWest => 5,
        }
    }

    /// Next vertex clockwise
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % 6]
    }

    /// The two neighbors sharing this vertex, in clockwise order
    pub fn neighbor_pair(&self) -> (NeighborDirection, NeighborDirection) {
        use NeighborDirection as N;
        match self {
            VertexDirection::NorthEast => (N::North, N::NorthEast),
            VertexDirection::East => (N::NorthEast, N::SouthEast),
            VertexDirection::SouthEast => (N::SouthEast, N::South),
            VertexDirection::SouthWest => (N::South, N::SouthWest),
            VertexDirection::West => (N::SouthWest, N::NorthWest),
            VertexDirection::NorthWest => (N::NorthWest, N::North),
        }
    }
}

/// A point in world space (y grows upwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Horizontal swipe gesture that rotates the selected three cells
///
/// - **Left**: the anchor moves to the second neighbor's slot
/// - **Right**: the anchor moves to the first neighbor's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Parse swipe from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use hexmatch_types::SwipeDirection;
    ///
    /// assert_eq!(SwipeDirection::from_str("LEFT"), Some(SwipeDirection::Left));
    /// assert_eq!(SwipeDirection::from_str("r"), Some(SwipeDirection::Right));
    /// assert_eq!(SwipeDirection::from_str("up"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(SwipeDirection::Left),
            "right" | "r" => Some(SwipeDirection::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}
