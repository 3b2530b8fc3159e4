//! Cascade module - the match, clear, fall and refill state machine
//!
//! [`Cascade`] owns the board, the palette and the seeded RNG. Every operation is
//! a plain synchronous function that runs to completion; the presentation layer
//! learns what happened by draining the ordered [`BoardEvent`] queue, where
//! [`BoardEvent::Pause`] markers show where it may wait before showing the next
//! step.
//!
//! # Phases
//!
//! | Phase           | Entered by                                 |
//! |-----------------|--------------------------------------------|
//! | `Idle`          | construction                               |
//! | `Colorizing`    | [`Cascade::generate`], [`Cascade::colorize`] |
//! | `AwaitingInput` | a successful colorize or a settled cascade |
//! | `Swapping`      | [`Cascade::apply_swap`]                    |
//! | `Scoring`       | [`Cascade::score_pass`]                    |
//! | `Collapsing`    | [`Cascade::collapse_step`]                 |
//! | `Refilling`     | [`Cascade::refill`]                        |
//!
//! `AwaitingInput` is the settled state: a successful colorize and every
//! cascade end there. `Idle` only marks a board that was never generated.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ColorizeError, SelectionError};
use crate::layout::HexLayout;
use crate::matcher;
use crate::palette::Palette;
use crate::rng::BoardRng;
use crate::scoring::ScoreResult;
use crate::selection::{self, SelectionResult};
use crate::snapshot::GameSnapshot;
use crate::types::{
    ColorId, GridPosition, Point, SwipeDirection, MAX_ROTATION_ATTEMPTS, POINTS_PER_CELL,
};

/// Score/collapse/refill rounds after which a cascade is cut short
pub const MAX_CASCADE_ROUNDS: u32 = 1000;

/// Where the board is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Colorizing,
    AwaitingInput,
    Swapping,
    Scoring,
    Collapsing,
    Refilling,
}

/// Points in an event stream where presentation may wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseKind {
    AfterSwap,
    AfterCollapseStep,
    AfterRefill,
}

/// One observable change to the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardEvent {
    /// The cell that was in slot `from` now sits in slot `to`
    CellMoved { from: GridPosition, to: GridPosition },
    /// A refilled cell enters its column at `origin`, above the top row
    CellSpawned {
        position: GridPosition,
        origin: Point,
    },
    /// A cell was painted/refilled (`active`) or cleared; `target` is its slot center
    CellActivated {
        position: GridPosition,
        target: Point,
        active: bool,
    },
    CellScored {
        position: GridPosition,
        color: ColorId,
    },
    Selected(SelectionResult),
    Pause(PauseKind),
}

/// Summary of one settled cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Score passes that cleared something
    pub rounds: u32,
    pub runs: u32,
    pub cells_cleared: u32,
    pub points: u32,
    /// Possible-move total of the settled board
    pub possible_moves: u32,
}

impl CascadeReport {
    pub fn scored(&self) -> bool {
        self.cells_cleared > 0
    }
}

/// Result of a swipe: how many rotations it took and what the last one produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureOutcome {
    pub rotations: u8,
    pub scored: bool,
    pub report: CascadeReport,
}

/// Board state machine
#[derive(Debug, Clone)]
pub struct Cascade {
    board: Board,
    palette: Palette,
    layout: HexLayout,
    rng: BoardRng,
    phase: Phase,
    points_per_cell: u32,
    score: u32,
    events: Vec<BoardEvent>,
}

impl Cascade {
    /// Create an unpainted board sized and seeded from `config`
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Board::new(config.rows, config.columns),
            palette: config.build_palette(),
            layout: HexLayout::new(config.cell_width, 1.0, Point::default()),
            rng: BoardRng::new(config.seed),
            phase: Phase::Idle,
            points_per_cell: config.points_per_cell,
            score: 0,
            events: Vec::new(),
        }
    }

    /// Wrap an existing board, e.g. one built with [`Board::from_colors`]
    pub fn from_board(board: Board, palette: Palette, seed: u64) -> Self {
        Self {
            board,
            palette,
            layout: HexLayout::default(),
            rng: BoardRng::new(seed),
            phase: Phase::AwaitingInput,
            points_per_cell: POINTS_PER_CELL,
            score: 0,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Points earned since the last [`generate`](Self::generate)
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Replace every cell with a fresh unpainted one and reset the score
    pub fn generate(&mut self) {
        self.board.generate();
        self.score = 0;
        self.events.clear();
        self.phase = Phase::Colorizing;
    }

    /// Paint every cell once without creating a run
    ///
    /// Each cell tries the offerable colors in a random order. A cell that accepts
    /// none fails the pass; the board is left unpainted and no events are emitted.
    pub fn colorize(&mut self) -> Result<(), ColorizeError> {
        self.phase = Phase::Colorizing;
        self.palette.reset_usage();
        self.palette.validate_capacity(self.board.len())?;
        self.board.clear_colors();

        for idx in 0..self.board.len() {
            let position = self.board.position_at(idx);
            let candidates = self.palette.draw_order(&mut self.rng);
            let placed = candidates
                .into_iter()
                .any(|color| self.palette.try_assign(&mut self.board, position, color, true));
            if !placed {
                self.board.clear_colors();
                return Err(ColorizeError::Exhausted { position });
            }
        }

        for idx in 0..self.board.len() {
            let position = self.board.position_at(idx);
            self.events.push(BoardEvent::CellActivated {
                position,
                target: self.layout.slot_center(position),
                active: true,
            });
        }
        self.phase = Phase::AwaitingInput;
        Ok(())
    }

    /// Run [`colorize`](Self::colorize) until it succeeds, returning the attempt count
    ///
    /// An undersized palette fails on the first attempt; other failures are
    /// retried up to `max_attempts` times.
    pub fn colorize_with_retries(&mut self, max_attempts: u32) -> Result<u32, ColorizeError> {
        for attempt in 1..=max_attempts {
            match self.colorize() {
                Ok(()) => {
                    debug!(attempt, "board colorized");
                    return Ok(attempt);
                }
                Err(err @ ColorizeError::InsufficientPalette { .. }) => return Err(err),
                Err(err) => debug!(attempt, error = %err, "colorize pass failed"),
            }
        }
        warn!(attempts = max_attempts, "giving up on colorizing the board");
        Err(ColorizeError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    /// Resolve the group selected by touching `anchor` at `point`
    pub fn select(
        &mut self,
        anchor: GridPosition,
        point: Point,
    ) -> Result<SelectionResult, SelectionError> {
        let selection = selection::resolve(&self.board, &self.layout, anchor, point)?;
        self.events.push(BoardEvent::Selected(selection));
        Ok(selection)
    }

    /// Rotate the three selected cells once
    ///
    /// With the neighbors in clockwise order, `Left` moves anchor to neighbor2,
    /// neighbor1 to anchor and neighbor2 to neighbor1; `Right` is the inverse.
    pub fn apply_swap(&mut self, selection: &SelectionResult, direction: SwipeDirection) {
        self.phase = Phase::Swapping;
        let selection = selection.normalized();
        let anchor = selection.anchor;
        let (n1, n2) = (selection.neighbor1.0, selection.neighbor2.0);

        match direction {
            SwipeDirection::Left => {
                self.swap_cells(anchor, n2);
                self.swap_cells(n1, anchor);
            }
            SwipeDirection::Right => {
                self.swap_cells(anchor, n1);
                self.swap_cells(anchor, n2);
            }
        }
        self.events.push(BoardEvent::Pause(PauseKind::AfterSwap));
    }

    fn swap_cells(&mut self, a: GridPosition, b: GridPosition) {
        self.board.swap(a, b);
        self.events.push(BoardEvent::CellMoved { from: a, to: b });
        self.events.push(BoardEvent::CellMoved { from: b, to: a });
    }

    /// Clear runs until none is left
    ///
    /// Scans in slot order, clears the first run found and starts over.
    pub fn score_pass(&mut self) -> ScoreResult {
        self.phase = Phase::Scoring;
        let mut result = ScoreResult::default();

        while let Some(run) = matcher::find_first_run(&self.board) {
            for &position in &run {
                let Some(color) = self.board.color_at(position) else {
                    continue;
                };
                self.board.deactivate(position);
                self.events.push(BoardEvent::CellScored { position, color });
                self.events.push(BoardEvent::CellActivated {
                    position,
                    target: self.layout.slot_center(position),
                    active: false,
                });
            }
            debug!(origin = %run[0], cells = run.len(), "run cleared");
            result.add_run(run.len(), self.points_per_cell);
        }

        self.score = self.score.saturating_add(result.points);
        result
    }

    /// Drop one active cell into the gap below it
    ///
    /// Columns are visited last to first and rows bottom-up; the first inactive
    /// cell with an active cell directly above trades places with it. Returns the
    /// (from, to) slots of the cell that fell.
    pub fn collapse_step(&mut self) -> Option<(GridPosition, GridPosition)> {
        self.phase = Phase::Collapsing;
        for column in (0..self.board.columns() as i32).rev() {
            for row in (1..self.board.rows() as i32).rev() {
                let gap = GridPosition::new(row, column);
                let above = GridPosition::new(row - 1, column);
                if !self.board.is_active(gap) && self.board.is_active(above) {
                    self.board.swap(gap, above);
                    self.events.push(BoardEvent::CellMoved {
                        from: above,
                        to: gap,
                    });
                    self.events
                        .push(BoardEvent::Pause(PauseKind::AfterCollapseStep));
                    return Some((above, gap));
                }
            }
        }
        None
    }

    /// Apply [`collapse_step`](Self::collapse_step) until nothing falls
    pub fn collapse(&mut self) -> usize {
        let mut steps = 0;
        while self.collapse_step().is_some() {
            steps += 1;
        }
        if steps > 0 {
            debug!(steps, "board collapsed");
        }
        steps
    }

    /// Paint every inactive cell with a random color and reactivate it
    ///
    /// Refills skip the adjacency check; any run they create is cleared by the
    /// next score pass. Returns the number of cells placed.
    pub fn refill(&mut self) -> usize {
        self.phase = Phase::Refilling;
        let mut placed = 0;
        for column in (0..self.board.columns() as i32).rev() {
            for row in (0..self.board.rows() as i32).rev() {
                let position = GridPosition::new(row, column);
                if self.board.is_active(position) {
                    continue;
                }
                let Some(color) = self.palette.draw_any(&mut self.rng) else {
                    continue;
                };
                if self
                    .palette
                    .try_assign(&mut self.board, position, color, false)
                {
                    placed += 1;
                    self.events.push(BoardEvent::CellSpawned {
                        position,
                        origin: self.layout.spawn_point(position),
                    });
                    self.events.push(BoardEvent::CellActivated {
                        position,
                        target: self.layout.slot_center(position),
                        active: true,
                    });
                }
            }
        }
        if placed > 0 {
            self.events.push(BoardEvent::Pause(PauseKind::AfterRefill));
        }
        placed
    }

    /// Score, collapse and refill until the board settles
    pub fn resolve_cascade(&mut self) -> CascadeReport {
        let mut report = CascadeReport::default();

        loop {
            let pass = self.score_pass();
            if !pass.scored() {
                break;
            }
            report.rounds += 1;
            report.runs += pass.runs;
            report.cells_cleared += pass.cells_cleared;
            report.points = report.points.saturating_add(pass.points);

            self.collapse();
            if self.refill() == 0 {
                break;
            }
            if report.rounds >= MAX_CASCADE_ROUNDS {
                warn!(rounds = report.rounds, "cascade cut short");
                break;
            }
        }

        report.possible_moves = self.total_possible_moves();
        self.phase = Phase::AwaitingInput;
        report
    }

    /// Rotate the selected group until a rotation scores, at most three times
    ///
    /// Three rotations without a score bring every cell back to where it started.
    pub fn play_gesture(
        &mut self,
        selection: &SelectionResult,
        direction: SwipeDirection,
    ) -> GestureOutcome {
        let mut rotations = 0;
        let mut report = CascadeReport::default();

        while rotations < MAX_ROTATION_ATTEMPTS {
            rotations += 1;
            self.apply_swap(selection, direction);
            report = self.resolve_cascade();
            if report.scored() {
                break;
            }
        }

        debug!(
            anchor = %selection.anchor,
            direction = direction.as_str(),
            rotations,
            points = report.points,
            "gesture resolved"
        );
        GestureOutcome {
            rotations,
            scored: report.scored(),
            report,
        }
    }

    /// Sum of the local possible-move counts; zero means the game is over
    pub fn total_possible_moves(&self) -> u32 {
        matcher::total_possible_moves(&self.board)
    }

    /// Take every event emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        out.rows = self.board.rows();
        out.columns = self.board.columns();
        for cell in self.board.cells() {
            out.colors.push(cell.color().map(|color| color.0));
            out.active.push(cell.is_active());
        }
        out.score = self.score;
        out.phase = self.phase;
        out.possible_moves = self.total_possible_moves();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NeighborDirection;

    fn distinct_3x3() -> Cascade {
        let board = Board::from_colors(3, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        Cascade::from_board(board, Palette::free_colors(9), 7)
    }

    fn center_selection() -> SelectionResult {
        SelectionResult {
            anchor: GridPosition::new(1, 1),
            input: Point::default(),
            neighbor1: (GridPosition::new(2, 1), NeighborDirection::South),
            neighbor2: (GridPosition::new(2, 0), NeighborDirection::SouthWest),
        }
    }

    #[test]
    fn test_colorize_leaves_no_run() {
        let config = GameConfig::default();
        let mut cascade = Cascade::new(&config);
        assert_eq!(cascade.phase(), Phase::Idle);
        cascade.generate();
        assert_eq!(cascade.phase(), Phase::Colorizing);

        let attempts = cascade.colorize_with_retries(10).unwrap();
        assert!(attempts >= 1);
        assert_eq!(cascade.phase(), Phase::AwaitingInput);
        assert!(cascade.board().cells().iter().all(|c| c.live_color().is_some()));
        assert!(matcher::find_first_run(cascade.board()).is_none());
    }

    #[test]
    fn test_colorize_single_color_fails_fast() {
        let config = GameConfig {
            palette: vec![crate::palette::ColorSpec::free(0)],
            ..GameConfig::default()
        };
        let mut cascade = Cascade::new(&config);
        cascade.generate();
        let err = cascade.colorize_with_retries(5).unwrap_err();
        assert!(matches!(err, ColorizeError::InsufficientPalette { .. }));
        assert!(cascade.drain_events().is_empty());
    }

    #[test]
    fn test_swap_left_then_right_restores() {
        let mut cascade = distinct_3x3();
        let before = cascade.board().live_colors();

        cascade.apply_swap(&center_selection(), SwipeDirection::Left);
        assert_ne!(cascade.board().live_colors(), before);
        cascade.apply_swap(&center_selection(), SwipeDirection::Right);
        assert_eq!(cascade.board().live_colors(), before);
    }

    #[test]
    fn test_swap_left_moves_anchor_to_second_neighbor() {
        let mut cascade = distinct_3x3();
        cascade.apply_swap(&center_selection(), SwipeDirection::Left);
        let board = cascade.board();
        // anchor (1,1)=4, n1 (2,1)=7, n2 (2,0)=6
        assert_eq!(board.color_at(GridPosition::new(2, 0)), Some(ColorId(4)));
        assert_eq!(board.color_at(GridPosition::new(1, 1)), Some(ColorId(7)));
        assert_eq!(board.color_at(GridPosition::new(2, 1)), Some(ColorId(6)));
        assert_eq!(
            cascade.drain_events().last(),
            Some(&BoardEvent::Pause(PauseKind::AfterSwap))
        );
    }

    #[test]
    fn test_inverted_labels_rotate_the_same_way() {
        let mut plain = distinct_3x3();
        let mut inverted = distinct_3x3();
        let sel = center_selection();
        let flipped = SelectionResult {
            neighbor1: sel.neighbor2,
            neighbor2: sel.neighbor1,
            ..sel
        };
        plain.apply_swap(&sel, SwipeDirection::Right);
        inverted.apply_swap(&flipped, SwipeDirection::Right);
        assert_eq!(plain.board().live_colors(), inverted.board().live_colors());
    }

    #[test]
    fn test_three_rotations_without_score_restore_board() {
        let mut cascade = distinct_3x3();
        let before = cascade.board().clone();

        let outcome = cascade.play_gesture(&center_selection(), SwipeDirection::Left);
        assert_eq!(outcome.rotations, MAX_ROTATION_ATTEMPTS);
        assert!(!outcome.scored);
        assert_eq!(cascade.board(), &before);
        assert_eq!(cascade.score(), 0);
        assert_eq!(cascade.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn test_scoring_rotation_stops_gesture() {
        // Rotating right brings a third 9 into the (1,0), (1,1), (2,0) triangle.
        let board = Board::from_colors(3, 3, &[0, 2, 3, 9, 1, 4, 9, 9, 5]);
        let mut cascade = Cascade::from_board(board, Palette::free_colors(9), 3);
        assert!(matcher::find_first_run(cascade.board()).is_none());

        let outcome = cascade.play_gesture(&center_selection(), SwipeDirection::Right);
        assert_eq!(outcome.rotations, 1);
        assert!(outcome.scored);
        assert!(outcome.report.cells_cleared >= 3);
        assert_eq!(cascade.score(), outcome.report.points);
        assert!(cascade.score() >= 15);
        assert_eq!(cascade.board().inactive_count(), 0);

        let events = cascade.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::CellScored { color: ColorId(9), .. })));
        assert!(events.contains(&BoardEvent::Pause(PauseKind::AfterRefill)));
    }

    #[test]
    fn test_collapse_shifts_column_down() {
        let mut board = Board::from_colors(5, 1, &[0, 1, 2, 3, 4]);
        board.deactivate(GridPosition::new(3, 0));
        board.deactivate(GridPosition::new(4, 0));
        let mut cascade = Cascade::from_board(board, Palette::free_colors(5), 1);

        let first = cascade.collapse_step();
        assert_eq!(first, Some((GridPosition::new(2, 0), GridPosition::new(3, 0))));
        cascade.collapse();

        let board = cascade.board();
        assert!(!board.is_active(GridPosition::new(0, 0)));
        assert!(!board.is_active(GridPosition::new(1, 0)));
        assert_eq!(board.color_at(GridPosition::new(2, 0)), Some(ColorId(0)));
        assert_eq!(board.color_at(GridPosition::new(3, 0)), Some(ColorId(1)));
        assert_eq!(board.color_at(GridPosition::new(4, 0)), Some(ColorId(2)));
        assert_eq!(cascade.collapse_step(), None);
    }

    #[test]
    fn test_refill_reactivates_every_gap() {
        let mut board = Board::from_colors(3, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        board.deactivate(GridPosition::new(0, 0));
        board.deactivate(GridPosition::new(0, 2));
        let mut cascade = Cascade::from_board(board, Palette::free_colors(4), 11);

        assert_eq!(cascade.refill(), 2);
        assert_eq!(cascade.board().inactive_count(), 0);
        assert_eq!(cascade.refill(), 0);
    }

    #[test]
    fn test_refill_spawns_cells_above_their_column() {
        let mut board = Board::from_colors(3, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let gap = GridPosition::new(2, 1);
        board.deactivate(gap);
        let mut cascade = Cascade::from_board(board, Palette::free_colors(4), 5);
        cascade.drain_events();

        assert_eq!(cascade.refill(), 1);
        let events = cascade.drain_events();
        let BoardEvent::CellSpawned { position, origin } = events[0] else {
            panic!("expected a spawn first, got {:?}", events[0]);
        };
        assert_eq!(position, gap);
        let top = cascade.layout().slot_center(GridPosition::new(0, 1));
        assert_eq!(origin.x, top.x);
        assert!(origin.y > top.y);
        assert!(matches!(
            events[1],
            BoardEvent::CellActivated { position, active: true, .. } if position == gap
        ));
        assert_eq!(events[2], BoardEvent::Pause(PauseKind::AfterRefill));
    }

    #[test]
    fn test_events_serialize_for_presentation() {
        let moved = BoardEvent::CellMoved {
            from: GridPosition::new(0, 1),
            to: GridPosition::new(1, 1),
        };
        assert_eq!(
            serde_json::to_value(moved).unwrap(),
            serde_json::json!({
                "cell_moved": {
                    "from": { "row": 0, "column": 1 },
                    "to": { "row": 1, "column": 1 }
                }
            })
        );
        assert_eq!(
            serde_json::to_value(BoardEvent::Pause(PauseKind::AfterRefill)).unwrap(),
            serde_json::json!({ "pause": "after_refill" })
        );
    }

    #[test]
    fn test_snapshot_reflects_board() {
        let mut board = Board::from_colors(2, 2, &[0, 1, 2, 3]);
        board.deactivate(GridPosition::new(1, 1));
        let cascade = Cascade::from_board(board, Palette::free_colors(4), 1);

        let snap = cascade.snapshot();
        assert_eq!((snap.rows, snap.columns), (2, 2));
        assert_eq!(snap.colors, vec![Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(snap.active, vec![true, true, true, false]);
        assert_eq!(snap.phase, Phase::AwaitingInput);
    }
}
