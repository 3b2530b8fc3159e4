//! Adjacency module - neighbor lookup on a staggered hex grid
//!
//! Columns alternate parity: odd columns are drawn half a cell lower than even
//! columns, so the diagonal neighbors of a cell depend on its column.
//!
//! | direction | even column Δ(row, col) | odd column Δ(row, col) |
//! |-----------|-------------------------|------------------------|
//! | N         | (-1,  0)                | (-1,  0)               |
//! | NE        | (-1, +1)                | ( 0, +1)               |
//! | SE        | ( 0, +1)                | (+1, +1)               |
//! | S         | (+1,  0)                | (+1,  0)               |
//! | SW        | ( 0, -1)                | (+1, -1)               |
//! | NW        | (-1, -1)                | ( 0, -1)               |
//!
//! Every other module resolves neighbors through this table.

use crate::types::{GridPosition, NeighborDirection};

/// A neighbor slot of a cell, recomputed on every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor {
    pub direction: NeighborDirection,
    /// `None` when the neighbor would fall outside the board
    pub cell: Option<GridPosition>,
}

/// Row/column delta for `direction` from a cell in an even or odd column
#[inline]
pub fn delta(direction: NeighborDirection, even_column: bool) -> (i32, i32) {
    match (direction, even_column) {
        (NeighborDirection::North, _) => (-1, 0),
        (NeighborDirection::South, _) => (1, 0),
        (NeighborDirection::NorthEast, true) => (-1, 1),
        (NeighborDirection::NorthEast, false) => (0, 1),
        (NeighborDirection::SouthEast, true) => (0, 1),
        (NeighborDirection::SouthEast, false) => (1, 1),
        (NeighborDirection::SouthWest, true) => (0, -1),
        (NeighborDirection::SouthWest, false) => (1, -1),
        (NeighborDirection::NorthWest, true) => (-1, -1),
        (NeighborDirection::NorthWest, false) => (0, -1),
    }
}

/// Neighbor of `position` in `direction` on a `rows x columns` board
///
/// Returns None if the neighbor is out of bounds.
pub fn neighbor(
    position: GridPosition,
    direction: NeighborDirection,
    rows: u16,
    columns: u16,
) -> Option<GridPosition> {
    let (d_row, d_column) = delta(direction, position.is_even_column());
    let target = position.offset(d_row, d_column);
    target.in_bounds(rows, columns).then_some(target)
}

/// All six neighbors of `position`, in cyclic direction order
pub fn neighbors(position: GridPosition, rows: u16, columns: u16) -> [Neighbor; 6] {
    NeighborDirection::ALL.map(|direction| Neighbor {
        direction,
        cell: neighbor(position, direction, rows, columns),
    })
}
