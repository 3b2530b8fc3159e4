//! Serializable view of the board for observers and replays.

use serde::{Deserialize, Serialize};

use crate::cascade::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: u16,
    pub columns: u16,
    /// Row-major color ids; inactive cells keep the color they were cleared with
    pub colors: Vec<Option<u8>>,
    /// Row-major activity mask
    pub active: Vec<bool>,
    pub score: u32,
    /// Scoring gestures so far; filled in by the session
    pub moves: u32,
    pub possible_moves: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.columns = 0;
        self.colors.clear();
        self.active.clear();
        self.score = 0;
        self.moves = 0;
        self.possible_moves = 0;
        self.phase = Phase::Idle;
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::AwaitingInput && self.possible_moves == 0
    }

    /// Color at `row`, `column` if the cell is active
    pub fn live_color(&self, row: usize, column: usize) -> Option<u8> {
        let idx = row * self.columns as usize + column;
        match self.active.get(idx) {
            Some(true) => self.colors.get(idx).copied().flatten(),
            _ => None,
        }
    }
}
