//! Selection module - maps a point on a cell to a three-cell group
//!
//! The player touches a cell near one of its six vertices. The vertex names two
//! neighbors (see [`VertexDirection::neighbor_pair`]); together with the touched
//! cell they form the group a swipe will rotate. On the board edge one of the two
//! neighbors may be missing, in which case the next vertex clockwise is tried.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::SelectionError;
use crate::layout::HexLayout;
use crate::types::{GridPosition, NeighborDirection, Point, VertexDirection};

/// The anchor cell plus the two neighbors a gesture will rotate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub anchor: GridPosition,
    pub input: Point,
    pub neighbor1: (GridPosition, NeighborDirection),
    pub neighbor2: (GridPosition, NeighborDirection),
}

impl SelectionResult {
    /// Anchor, first neighbor, second neighbor
    pub fn positions(&self) -> [GridPosition; 3] {
        [self.anchor, self.neighbor1.0, self.neighbor2.0]
    }

    /// Whether the neighbors are labelled in clockwise order
    pub fn is_clockwise(&self) -> bool {
        self.neighbor1.1.next() == self.neighbor2.1
    }

    /// Same selection with the neighbors relabelled into clockwise order
    pub fn normalized(&self) -> Self {
        if self.is_clockwise() {
            *self
        } else {
            Self {
                neighbor1: self.neighbor2,
                neighbor2: self.neighbor1,
                ..*self
            }
        }
    }
}

/// Resolve the group selected by touching `anchor` at `input`
///
/// The nearest vertex (by Euclidean distance in `layout`) picks the starting
/// neighbor pair.
pub fn resolve(
    board: &Board,
    layout: &HexLayout,
    anchor: GridPosition,
    input: Point,
) -> Result<SelectionResult, SelectionError> {
    let vertex = layout.nearest_vertex(anchor, input);
    resolve_from_vertex(board, anchor, vertex, input)
}

/// Resolve the group starting at `vertex`, advancing clockwise past board edges
pub fn resolve_from_vertex(
    board: &Board,
    anchor: GridPosition,
    vertex: VertexDirection,
    input: Point,
) -> Result<SelectionResult, SelectionError> {
    if board.index(anchor).is_none() {
        return Err(SelectionError::OutOfBounds { position: anchor });
    }

    let ring = board.neighbors_of(anchor);
    let mut vertex = vertex;
    for _ in 0..VertexDirection::ALL.len() {
        let (first, second) = vertex.neighbor_pair();
        if let (Some(p1), Some(p2)) = (ring[first.index()].cell, ring[second.index()].cell) {
            return Ok(SelectionResult {
                anchor,
                input,
                neighbor1: (p1, first),
                neighbor2: (p2, second),
            });
        }
        vertex = vertex.next();
    }

    Err(SelectionError::Isolated { anchor })
}
