//! Matcher module - run detection and possible-move counting
//!
//! A run is a cell plus two or more of its neighbors that share its color, where the
//! neighbors are cyclically consecutive (and therefore touch each other). Detection
//! is "first found": each cell reports at most one run per query.
//!
//! The possible-move count is a cheap local estimate of whether the board can still
//! produce a run. It tallies colors around each cell and discards groups that are
//! already aligned, since those are existing matches rather than moves.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{ColorId, GridPosition, NeighborDirection};

/// Positions forming one run: the origin cell first, then its matching neighbors
pub type Run = ArrayVec<GridPosition, 4>;

/// Tally size at which a color counts as a possible move
const MOVE_THRESHOLD: i32 = 3;

/// Aligned groups that pass through the cell itself
const LINES: [(NeighborDirection, NeighborDirection); 3] = [
    (NeighborDirection::North, NeighborDirection::South),
    (NeighborDirection::NorthEast, NeighborDirection::SouthWest),
    (NeighborDirection::SouthEast, NeighborDirection::NorthWest),
];

/// Aligned groups formed by alternating neighbors around the cell
const TRIANGLES: [[NeighborDirection; 3]; 2] = [
    [
        NeighborDirection::North,
        NeighborDirection::SouthEast,
        NeighborDirection::SouthWest,
    ],
    [
        NeighborDirection::South,
        NeighborDirection::NorthEast,
        NeighborDirection::NorthWest,
    ],
];

/// First run passing through `position`
///
/// Scans neighbors in cyclic order. For the first neighbor that shares the cell's
/// color and has a same-colored previous or next neighbor, returns the cell followed
/// by that neighbor and its matching previous/next neighbors. Empty if no run exists
/// or the cell is inactive.
pub fn runs_through(board: &Board, position: GridPosition) -> Run {
    let mut run = Run::new();
    let Some(color) = board.color_at(position) else {
        return run;
    };

    let ring = board.neighbors_of(position);
    let live = |idx: usize| ring[idx % 6].cell.filter(|&pos| board.color_at(pos) == Some(color));

    for i in 0..6 {
        let Some(current) = live(i) else {
            continue;
        };

        let mut same = ArrayVec::<GridPosition, 3>::new();
        same.push(current);
        if let Some(previous) = live(i + 5) {
            same.push(previous);
        }
        if let Some(next) = live(i + 1) {
            same.push(next);
        }

        if same.len() > 1 {
            run.push(position);
            run.extend(same);
            return run;
        }
    }

    run
}

/// First run on the board, scanning active cells in slot order
pub fn find_first_run(board: &Board) -> Option<Run> {
    board
        .positions()
        .map(|pos| runs_through(board, pos))
        .find(|run| run.len() > 2)
}

/// Local possible-move estimate around `position`
///
/// Tallies the cell's color (weight 1) and every live neighbor's color, subtracts 3
/// for each already-aligned group (lines through the cell in its own color, and the
/// two alternating triangles in any single color), then counts colors whose tally is
/// still at least 3. Inactive cells contribute nothing.
pub fn possible_move_count(board: &Board, position: GridPosition) -> u32 {
    let Some(color) = board.color_at(position) else {
        return 0;
    };

    let ring = board.neighbors_of(position);
    let color_in = |direction: NeighborDirection| {
        ring[direction.index()]
            .cell
            .and_then(|pos| board.color_at(pos))
    };

    let mut tally = Tally::default();
    tally.add(color);
    for neighbor in &ring {
        if let Some(neighbor_color) = neighbor.cell.and_then(|pos| board.color_at(pos)) {
            tally.add(neighbor_color);
        }
    }

    for (a, b) in LINES {
        if color_in(a) == Some(color) && color_in(b) == Some(color) {
            tally.erase(color);
        }
    }

    for [a, b, c] in TRIANGLES {
        if let (Some(ca), Some(cb), Some(cc)) = (color_in(a), color_in(b), color_in(c)) {
            if ca == cb && cb == cc {
                tally.erase(ca);
            }
        }
    }

    tally.moves()
}

/// Sum of [`possible_move_count`] over every active cell; zero means game over
pub fn total_possible_moves(board: &Board) -> u32 {
    board
        .positions()
        .map(|pos| possible_move_count(board, pos))
        .sum()
}

/// Color multiset for one cell and its ring (at most 7 distinct colors)
#[derive(Default)]
struct Tally {
    counts: ArrayVec<(ColorId, i32), 7>,
}

impl Tally {
    fn add(&mut self, color: ColorId) {
        match self.counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((color, 1)),
        }
    }

    fn erase(&mut self, color: ColorId) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(c, _)| *c == color) {
            *count -= MOVE_THRESHOLD;
        }
    }

    fn moves(&self) -> u32 {
        self.counts
            .iter()
            .filter(|(_, count)| *count >= MOVE_THRESHOLD)
            .count() as u32
    }
}
