//! Palette module - color buckets and the assignment policy
//!
//! A palette is an ordered list of [`ColorSpec`]s. `FixedCount` colors may be placed
//! at most `target` times per full colorization pass; `FreeCount` colors are
//! unlimited. Usage counters reset at the start of every full pass.
//!
//! The assignment policy optionally rejects a candidate when two or more of the
//! cell's live neighbors already hold it, which keeps a colorization pass from
//! spawning a ready-made run. Refills skip the check and rely on the next score
//! pass instead.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ColorizeError;
use crate::rng::BoardRng;
use crate::types::{ColorId, ColorKind, GridPosition};

/// Same-colored live neighbors at which a candidate is rejected
const IMMEDIATE_PAIR_LIMIT: usize = 2;

/// Free colors that make a palette valid regardless of fixed capacity
const MIN_FREE_COLORS: usize = 3;

/// One palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub id: ColorId,
    pub kind: ColorKind,
    /// Placement budget per pass; ignored for `FreeCount`
    #[serde(default)]
    pub target: u32,
    /// Placements so far in the current pass
    #[serde(skip)]
    pub used: u32,
}

impl ColorSpec {
    pub fn fixed(id: u8, target: u32) -> Self {
        Self {
            id: ColorId(id),
            kind: ColorKind::FixedCount,
            target,
            used: 0,
        }
    }

    pub fn free(id: u8) -> Self {
        Self {
            id: ColorId(id),
            kind: ColorKind::FreeCount,
            target: 0,
            used: 0,
        }
    }

    /// Whether this color may still be drawn in the current pass
    pub fn is_offerable(&self) -> bool {
        match self.kind {
            ColorKind::FixedCount => self.used < self.target,
            ColorKind::FreeCount => true,
        }
    }
}

/// The configured set of colors plus their per-pass usage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    specs: Vec<ColorSpec>,
}

impl Palette {
    pub fn new(specs: Vec<ColorSpec>) -> Self {
        Self { specs }
    }

    /// `count` free colors with ids `0..count`
    pub fn free_colors(count: u8) -> Self {
        Self::new((0..count).map(ColorSpec::free).collect())
    }

    pub fn specs(&self) -> &[ColorSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec(&self, id: ColorId) -> Option<&ColorSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Reset every usage counter; called at the start of a full pass
    pub fn reset_usage(&mut self) {
        for spec in &mut self.specs {
            spec.used = 0;
        }
    }

    /// Sum of `target` over `FixedCount` entries
    pub fn fixed_capacity(&self) -> u32 {
        self.specs
            .iter()
            .filter(|spec| spec.kind == ColorKind::FixedCount)
            .map(|spec| spec.target)
            .sum()
    }

    /// Number of `FreeCount` entries
    pub fn free_count(&self) -> usize {
        self.specs
            .iter()
            .filter(|spec| spec.kind == ColorKind::FreeCount)
            .count()
    }

    /// Check that the palette can cover `cells` cells
    ///
    /// Fixed capacity must cover the board unless at least three free colors exist.
    pub fn validate_capacity(&self, cells: usize) -> Result<(), ColorizeError> {
        let fixed_capacity = self.fixed_capacity();
        let free_colors = self.free_count();
        if (fixed_capacity as usize) < cells && free_colors < MIN_FREE_COLORS {
            return Err(ColorizeError::InsufficientPalette {
                fixed_capacity,
                cells,
                free_colors,
            });
        }
        Ok(())
    }

    /// Ids that may be drawn right now, in palette order
    pub fn offerable(&self) -> Vec<ColorId> {
        self.specs
            .iter()
            .filter(|spec| spec.is_offerable())
            .map(|spec| spec.id)
            .collect()
    }

    /// Offerable ids in a random order; each is tried at most once per cell
    pub fn draw_order(&self, rng: &mut BoardRng) -> Vec<ColorId> {
        let mut order = self.offerable();
        rng.shuffle(&mut order);
        order
    }

    /// One random color for a refill
    ///
    /// Falls back to the whole palette once every fixed budget is spent and no
    /// free color exists. Returns None only for an empty palette.
    pub fn draw_any(&self, rng: &mut BoardRng) -> Option<ColorId> {
        let offerable = self.offerable();
        if !offerable.is_empty() {
            return Some(offerable[rng.next_index(offerable.len())]);
        }
        if self.specs.is_empty() {
            return None;
        }
        Some(self.specs[rng.next_index(self.specs.len())].id)
    }

    /// Try to place `candidate` on the cell at `position`
    ///
    /// With `enforce_no_immediate_pair`, the candidate is rejected when two or more
    /// live neighbors already hold it. Spent `FixedCount` colors are rejected only
    /// when the check is on; refills may overdraw. On acceptance a live cell is
    /// painted and a cleared one reactivated with the color. The usage counter of
    /// a `FixedCount` color stops at its target.
    pub fn try_assign(
        &mut self,
        board: &mut Board,
        position: GridPosition,
        candidate: ColorId,
        enforce_no_immediate_pair: bool,
    ) -> bool {
        let Some(spec_idx) = self.specs.iter().position(|spec| spec.id == candidate) else {
            return false;
        };

        if enforce_no_immediate_pair {
            if !self.specs[spec_idx].is_offerable() {
                return false;
            }
            if same_color_neighbors(board, position, candidate) >= IMMEDIATE_PAIR_LIMIT {
                return false;
            }
        }

        if board.is_active(position) {
            board.paint(position, candidate);
        } else {
            board.reactivate(position, candidate);
        }
        let spec = &mut self.specs[spec_idx];
        if spec.kind == ColorKind::FreeCount || spec.used < spec.target {
            spec.used = spec.used.saturating_add(1);
        }
        true
    }
}

/// Count live neighbors of `position` holding `color`
pub fn same_color_neighbors(board: &Board, position: GridPosition, color: ColorId) -> usize {
    board
        .neighbors_of(position)
        .iter()
        .filter_map(|neighbor| neighbor.cell)
        .filter(|&pos| board.color_at(pos) == Some(color))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_validation() {
        // Enough fixed capacity.
        let palette = Palette::new(vec![ColorSpec::fixed(0, 40), ColorSpec::fixed(1, 40)]);
        assert!(palette.validate_capacity(72).is_ok());

        // Not enough fixed capacity, but three free colors.
        let palette = Palette::new(vec![
            ColorSpec::fixed(0, 5),
            ColorSpec::free(1),
            ColorSpec::free(2),
            ColorSpec::free(3),
        ]);
        assert!(palette.validate_capacity(72).is_ok());

        // Single free color.
        let palette = Palette::free_colors(1);
        assert_eq!(
            palette.validate_capacity(72),
            Err(ColorizeError::InsufficientPalette {
                fixed_capacity: 0,
                cells: 72,
                free_colors: 1,
            })
        );
    }

    #[test]
    fn test_fixed_count_is_not_offered_when_spent() {
        let mut palette = Palette::new(vec![ColorSpec::fixed(0, 1), ColorSpec::free(1)]);
        let mut board = Board::new(2, 2);

        assert!(palette.try_assign(&mut board, GridPosition::new(0, 0), ColorId(0), true));
        assert_eq!(palette.offerable(), vec![ColorId(1)]);
        assert!(!palette.try_assign(&mut board, GridPosition::new(1, 1), ColorId(0), true));

        palette.reset_usage();
        assert_eq!(palette.offerable(), vec![ColorId(0), ColorId(1)]);
    }

    #[test]
    fn test_rejects_candidate_with_two_matching_neighbors() {
        // (0,0)=0, (0,1)=0, (1,0)=unpainted, (1,1)=1.
        // (1,0) sits in an even column: N=(0,0), NE=(0,1), SE=(1,1).
        let mut board = Board::new(2, 2);
        board.reactivate(GridPosition::new(0, 0), ColorId(0));
        board.reactivate(GridPosition::new(0, 1), ColorId(0));
        board.reactivate(GridPosition::new(1, 1), ColorId(1));

        let mut palette = Palette::free_colors(3);
        let target = GridPosition::new(1, 0);
        assert_eq!(same_color_neighbors(&board, target, ColorId(0)), 2);
        assert!(!palette.try_assign(&mut board, target, ColorId(0), true));
        assert!(palette.try_assign(&mut board, target, ColorId(1), true));
        assert_eq!(board.color_at(target), Some(ColorId(1)));
        assert_eq!(palette.spec(ColorId(1)).unwrap().used, 1);
    }

    #[test]
    fn test_unchecked_assign_always_accepts() {
        let mut board = Board::from_colors(2, 2, &[0, 0, 0, 0]);
        board.deactivate(GridPosition::new(1, 0));
        let mut palette = Palette::free_colors(1);
        assert!(palette.try_assign(&mut board, GridPosition::new(1, 0), ColorId(0), false));
        assert!(board.is_active(GridPosition::new(1, 0)));
    }

    #[test]
    fn test_fixed_usage_stops_at_target() {
        let mut board = Board::from_colors(2, 2, &[1, 1, 1, 1]);
        board.deactivate(GridPosition::new(1, 1));
        let mut palette = Palette::new(vec![ColorSpec::fixed(0, 1), ColorSpec::free(1)]);

        assert!(palette.try_assign(&mut board, GridPosition::new(0, 0), ColorId(0), true));
        assert_eq!(palette.spec(ColorId(0)).unwrap().used, 1);

        // Unchecked refill of a spent color still lands but is not counted.
        assert!(palette.try_assign(&mut board, GridPosition::new(1, 1), ColorId(0), false));
        assert_eq!(board.color_at(GridPosition::new(1, 1)), Some(ColorId(0)));
        assert_eq!(palette.spec(ColorId(0)).unwrap().used, 1);

        assert!(palette.try_assign(&mut board, GridPosition::new(0, 1), ColorId(1), false));
        assert!(palette.try_assign(&mut board, GridPosition::new(1, 0), ColorId(1), false));
        assert_eq!(palette.spec(ColorId(1)).unwrap().used, 2);
    }

    #[test]
    fn test_assign_paints_live_cell_in_place() {
        let mut board = Board::new(2, 2);
        let mut palette = Palette::free_colors(2);
        let pos = GridPosition::new(0, 1);
        assert!(palette.try_assign(&mut board, pos, ColorId(1), true));
        assert!(board.is_active(pos));
        assert_eq!(board.inactive_count(), 0);
        assert_eq!(board.color_at(pos), Some(ColorId(1)));
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let mut board = Board::new(2, 2);
        let mut palette = Palette::free_colors(2);
        assert!(!palette.try_assign(&mut board, GridPosition::new(0, 0), ColorId(9), false));
    }

    #[test]
    fn test_draw_any_falls_back_to_whole_palette() {
        let mut palette = Palette::new(vec![ColorSpec::fixed(4, 1)]);
        let mut board = Board::new(1, 2);
        let mut rng = BoardRng::new(3);
        assert!(palette.try_assign(&mut board, GridPosition::new(0, 0), ColorId(4), true));
        assert!(palette.offerable().is_empty());
        assert_eq!(palette.draw_any(&mut rng), Some(ColorId(4)));
        assert_eq!(Palette::default().draw_any(&mut rng), None);
    }
}
