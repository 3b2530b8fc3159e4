//! Scoring module - points for cleared cells
//!
//! Every cleared cell is worth a flat amount (5 by default). A score pass may clear
//! several runs; [`ScoreResult`] accumulates them.

use serde::{Deserialize, Serialize};

/// Outcome of one or more cleared runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Runs cleared
    pub runs: u32,
    /// Cells deactivated across those runs
    pub cells_cleared: u32,
    pub points: u32,
}

impl ScoreResult {
    /// Record one cleared run of `cells` cells
    pub fn add_run(&mut self, cells: usize, points_per_cell: u32) {
        self.runs += 1;
        self.cells_cleared += cells as u32;
        self.points = self
            .points
            .saturating_add(calculate_run_score(cells, points_per_cell));
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: ScoreResult) {
        self.runs += other.runs;
        self.cells_cleared += other.cells_cleared;
        self.points = self.points.saturating_add(other.points);
    }

    pub fn scored(&self) -> bool {
        self.cells_cleared > 0
    }
}

/// Points for clearing a run of `cells` cells
pub fn calculate_run_score(cells: usize, points_per_cell: u32) -> u32 {
    (cells as u32).saturating_mul(points_per_cell)
}
