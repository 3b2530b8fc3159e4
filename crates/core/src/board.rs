//! Board module - manages the hex grid
//!
//! The board is a fixed `rows x columns` grid stored as a flat, row-major vector
//! (`row * columns + column`). The index of a slot never changes during a game:
//! swapping two slots exchanges their contents, and each cell keeps the coordinate
//! of the slot it now sits in. Gravity is expressed with the same swap primitive.
//!
//! Out-of-range positions are a caller bug. They trip a `debug_assert!` in debug
//! builds; release builds clamp lookups and ignore mutations.

use crate::adjacency::{self, Neighbor};
use crate::types::{ColorId, GridPosition, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// A single hex slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    position: GridPosition,
    /// None until the cell is first painted after `generate`
    color: Option<ColorId>,
    /// false once the cell has been scored and until it is refilled
    active: bool,
}

impl Cell {
    fn fresh(position: GridPosition) -> Self {
        Self {
            position,
            color: None,
            active: true,
        }
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn color(&self) -> Option<ColorId> {
        self.color
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Color of an active, painted cell; what matching and adjacency rules see
    pub fn live_color(&self) -> Option<ColorId> {
        if self.active {
            self.color
        } else {
            None
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u16,
    columns: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board of fresh, active, unpainted cells
    pub fn new(rows: u16, columns: u16) -> Self {
        debug_assert!(rows > 0 && columns > 0, "board must have at least one cell");
        let mut board = Self {
            rows,
            columns,
            cells: Vec::with_capacity(rows as usize * columns as usize),
        };
        board.generate();
        board
    }

    /// Replace every cell with a fresh, active, unpainted one
    pub fn generate(&mut self) {
        self.cells.clear();
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                self.cells.push(Cell::fresh(GridPosition::new(row, column)));
            }
        }
    }

    /// Build an active board from row-major color ids
    ///
    /// # Panics
    ///
    /// Panics if `colors.len() != rows * columns`.
    pub fn from_colors(rows: u16, columns: u16, colors: &[u8]) -> Self {
        assert_eq!(
            colors.len(),
            rows as usize * columns as usize,
            "expected {} colors for a {}x{} board",
            rows as usize * columns as usize,
            rows,
            columns
        );
        let mut board = Self::new(rows, columns);
        for (cell, &color) in board.cells.iter_mut().zip(colors) {
            cell.color = Some(ColorId(color));
        }
        board
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Number of cells on the board
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `position`, or None if out of bounds
    #[inline]
    pub fn index(&self, position: GridPosition) -> Option<usize> {
        position
            .in_bounds(self.rows, self.columns)
            .then(|| position.index(self.columns))
    }

    /// Position stored at flat `index`
    #[inline]
    pub fn position_at(&self, index: usize) -> GridPosition {
        let columns = self.columns as usize;
        GridPosition::new((index / columns) as i32, (index % columns) as i32)
    }

    #[inline]
    fn checked_index(&self, position: GridPosition) -> Option<usize> {
        let idx = self.index(position);
        debug_assert!(
            idx.is_some(),
            "position {} outside {}x{} board",
            position,
            self.rows,
            self.columns
        );
        idx
    }

    /// Cell at `position`
    ///
    /// Out-of-range positions are clamped to the nearest slot in release builds.
    pub fn get(&self, position: GridPosition) -> &Cell {
        match self.checked_index(position) {
            Some(idx) => &self.cells[idx],
            None => {
                let clamped = GridPosition::new(
                    position.row.clamp(0, self.rows as i32 - 1),
                    position.column.clamp(0, self.columns as i32 - 1),
                );
                &self.cells[clamped.index(self.columns)]
            }
        }
    }

    /// Cell at `position`, or None if out of bounds
    pub fn try_get(&self, position: GridPosition) -> Option<&Cell> {
        self.index(position).map(|idx| &self.cells[idx])
    }

    /// Color of the active cell at `position`
    pub fn color_at(&self, position: GridPosition) -> Option<ColorId> {
        self.try_get(position).and_then(Cell::live_color)
    }

    pub fn is_active(&self, position: GridPosition) -> bool {
        self.try_get(position).is_some_and(Cell::is_active)
    }

    /// Exchange the contents of two slots
    ///
    /// Each cell takes the coordinate of the slot it lands in.
    pub fn swap(&mut self, p1: GridPosition, p2: GridPosition) {
        let (Some(i), Some(j)) = (self.checked_index(p1), self.checked_index(p2)) else {
            return;
        };
        self.cells.swap(i, j);
        self.cells[i].position = p1;
        self.cells[j].position = p2;
    }

    /// Clear a scored cell; it keeps its color until refilled
    pub fn deactivate(&mut self, position: GridPosition) {
        if let Some(idx) = self.checked_index(position) {
            self.cells[idx].active = false;
        }
    }

    /// Set the color of a cell, leaving its active flag alone
    pub fn paint(&mut self, position: GridPosition, color: ColorId) {
        if let Some(idx) = self.checked_index(position) {
            self.cells[idx].color = Some(color);
        }
    }

    /// Refill a cell with `color` and mark it active
    pub fn reactivate(&mut self, position: GridPosition, color: ColorId) {
        if let Some(idx) = self.checked_index(position) {
            let cell = &mut self.cells[idx];
            cell.color = Some(color);
            cell.active = true;
        }
    }

    /// Forget every color, keeping activity flags
    pub fn clear_colors(&mut self) {
        for cell in &mut self.cells {
            cell.color = None;
        }
    }

    /// The six neighbor slots of `position`, resolved against the current dimensions
    pub fn neighbors_of(&self, position: GridPosition) -> [Neighbor; 6] {
        adjacency::neighbors(position, self.rows, self.columns)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.cells.iter().map(Cell::position)
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major colors, None for inactive or unpainted cells
    pub fn live_colors(&self) -> Vec<Option<ColorId>> {
        self.cells.iter().map(Cell::live_color).collect()
    }

    /// Number of inactive cells
    pub fn inactive_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.active).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(9, 8);
        assert_eq!(board.index(GridPosition::new(0, 0)), Some(0));
        assert_eq!(board.index(GridPosition::new(0, 7)), Some(7));
        assert_eq!(board.index(GridPosition::new(1, 0)), Some(8));
        assert_eq!(board.index(GridPosition::new(8, 7)), Some(71));
        assert_eq!(board.index(GridPosition::new(-1, 0)), None);
        assert_eq!(board.index(GridPosition::new(0, 8)), None);
        assert_eq!(board.index(GridPosition::new(9, 0)), None);
    }

    #[test]
    fn test_generate_assigns_slot_positions() {
        let board = Board::new(3, 4);
        assert_eq!(board.len(), 12);
        for (idx, cell) in board.cells().iter().enumerate() {
            assert_eq!(cell.position(), board.position_at(idx));
            assert!(cell.is_active());
            assert_eq!(cell.color(), None);
        }
    }

    #[test]
    fn test_swap_keeps_slot_identity() {
        let mut board = Board::from_colors(2, 2, &[0, 1, 2, 3]);
        let a = GridPosition::new(0, 0);
        let b = GridPosition::new(1, 1);
        board.swap(a, b);

        assert_eq!(board.get(a).color(), Some(ColorId(3)));
        assert_eq!(board.get(b).color(), Some(ColorId(0)));
        assert_eq!(board.get(a).position(), a);
        assert_eq!(board.get(b).position(), b);
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let mut board = Board::from_colors(2, 2, &[0, 1, 2, 3]);
        let pos = GridPosition::new(0, 1);

        board.deactivate(pos);
        assert!(!board.is_active(pos));
        assert_eq!(board.color_at(pos), None);
        assert_eq!(board.get(pos).color(), Some(ColorId(1)));
        assert_eq!(board.inactive_count(), 1);

        board.reactivate(pos, ColorId(7));
        assert!(board.is_active(pos));
        assert_eq!(board.color_at(pos), Some(ColorId(7)));
    }

    #[test]
    fn test_paint_keeps_active_flag() {
        let mut board = Board::new(2, 2);
        let live = GridPosition::new(1, 0);
        board.paint(live, ColorId(2));
        assert!(board.is_active(live));
        assert_eq!(board.color_at(live), Some(ColorId(2)));

        let cleared = GridPosition::new(0, 1);
        board.deactivate(cleared);
        board.paint(cleared, ColorId(5));
        assert!(!board.is_active(cleared));
        assert_eq!(board.get(cleared).color(), Some(ColorId(5)));
    }

    #[test]
    fn test_generate_replaces_cells() {
        let mut board = Board::from_colors(2, 2, &[0, 1, 2, 3]);
        board.deactivate(GridPosition::new(0, 0));
        board.generate();
        assert_eq!(board.inactive_count(), 0);
        assert!(board.cells().iter().all(|cell| cell.color().is_none()));
    }
}
