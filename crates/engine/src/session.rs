use std::collections::VecDeque;

use tracing::{debug, info};

use hexmatch_core::{
    BoardEvent, Cascade, ColorizeError, GameConfig, GameSnapshot, GestureOutcome,
    SelectionResult,
};
use hexmatch_types::{GridPosition, Point, SwipeDirection};

/// Player input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Touch `anchor` at world point `point`
    Select { anchor: GridPosition, point: Point },
    /// Rotate the current selection
    Swipe(SwipeDirection),
    /// Start a new game on the same configuration
    Restart,
}

impl Command {
    /// Whether the command is player input that a busy session drops
    pub fn is_input(&self) -> bool {
        matches!(self, Command::Select { .. } | Command::Swipe(_))
    }
}

/// What a session reports back to its caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Board(BoardEvent),
    Gesture(GestureOutcome),
    /// Possible-move total after the board settled
    MoveCount(u32),
    GameOver { score: u32, moves: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("failed to start a game: {0}")]
    Colorize(#[from] ColorizeError),
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    cascade: Cascade,
    queue: VecDeque<Command>,
    events: Vec<SessionEvent>,
    selection: Option<SelectionResult>,
    busy: bool,
    started: bool,
    game_over: bool,
    /// Gestures that scored
    moves: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let cascade = Cascade::new(&config);
        Self {
            config,
            cascade,
            queue: VecDeque::new(),
            events: Vec::new(),
            selection: None,
            busy: false,
            started: false,
            game_over: false,
            moves: 0,
        }
    }

    /// Generate and colorize a fresh board
    ///
    /// Returns the number of colorize attempts it took.
    pub fn start(&mut self) -> Result<u32, SessionError> {
        self.cascade.generate();
        self.queue.clear();
        self.selection = None;
        self.busy = false;
        self.game_over = false;
        self.moves = 0;
        self.started = false;

        let attempts = self
            .cascade
            .colorize_with_retries(self.config.max_colorize_attempts)?;
        self.started = true;
        self.forward_board_events();

        let possible = self.cascade.total_possible_moves();
        info!(
            rows = self.config.rows,
            columns = self.config.columns,
            seed = self.config.seed,
            attempts,
            possible_moves = possible,
            "game started"
        );
        self.report_moves(possible);
        Ok(attempts)
    }

    /// Queue a command for the next [`tick`](Self::tick)
    ///
    /// Input is dropped while the session is busy, before it has started, or
    /// after the game is over. Returns whether the command was queued.
    pub fn submit(&mut self, command: Command) -> bool {
        if command.is_input() {
            if let Some(reason) = self.input_blocked() {
                debug!(?command, reason, "input dropped");
                return false;
            }
        }
        self.queue.push_back(command);
        true
    }

    /// Apply the oldest queued command
    ///
    /// Returns false when the queue was empty.
    pub fn tick(&mut self) -> Result<bool, SessionError> {
        let Some(command) = self.queue.pop_front() else {
            return Ok(false);
        };

        match command {
            Command::Restart => {
                self.start()?;
            }
            command if self.input_blocked().is_some() => {
                debug!(?command, "queued input dropped");
            }
            Command::Select { anchor, point } => self.select(anchor, point),
            Command::Swipe(direction) => self.swipe(direction),
        }
        Ok(true)
    }

    /// Apply every queued command
    pub fn run_pending(&mut self) -> Result<usize, SessionError> {
        let mut applied = 0;
        while self.tick()? {
            applied += 1;
        }
        Ok(applied)
    }

    /// Mark the last gesture as fully presented, accepting input again
    pub fn acknowledge(&mut self) {
        self.busy = false;
    }

    /// Take every event since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn input_blocked(&self) -> Option<&'static str> {
        if !self.started {
            Some("not started")
        } else if self.game_over {
            Some("game over")
        } else if self.busy {
            Some("busy")
        } else {
            None
        }
    }

    fn select(&mut self, anchor: GridPosition, point: Point) {
        match self.cascade.select(anchor, point) {
            Ok(selection) => self.selection = Some(selection),
            Err(err) => {
                debug!(error = %err, "selection rejected");
                self.selection = None;
            }
        }
        self.forward_board_events();
    }

    /// Rotate the current selection, then select the same vertex again so the
    /// player can keep swiping
    fn swipe(&mut self, direction: SwipeDirection) {
        let Some(selection) = self.selection else {
            debug!(direction = direction.as_str(), "swipe without a selection");
            return;
        };

        self.busy = true;
        let outcome = self.cascade.play_gesture(&selection, direction);
        if outcome.scored {
            self.moves += 1;
        }
        self.selection = match self.cascade.select(selection.anchor, selection.input) {
            Ok(reselected) => Some(reselected),
            Err(err) => {
                debug!(error = %err, "selection lost after gesture");
                None
            }
        };
        self.forward_board_events();
        self.events.push(SessionEvent::Gesture(outcome));

        info!(
            anchor = %selection.anchor,
            direction = direction.as_str(),
            rotations = outcome.rotations,
            points = outcome.report.points,
            score = self.cascade.score(),
            "gesture played"
        );
        self.report_moves(outcome.report.possible_moves);
    }

    fn report_moves(&mut self, possible: u32) {
        self.events.push(SessionEvent::MoveCount(possible));
        if possible == 0 {
            self.game_over = true;
            let score = self.cascade.score();
            info!(score, moves = self.moves, "game over");
            self.events.push(SessionEvent::GameOver {
                score,
                moves: self.moves,
            });
        }
    }

    fn forward_board_events(&mut self) {
        self.events.extend(
            self.cascade
                .drain_events()
                .into_iter()
                .map(SessionEvent::Board),
        );
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<&SelectionResult> {
        self.selection.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.cascade.score()
    }

    pub fn total_possible_moves(&self) -> u32 {
        self.cascade.total_possible_moves()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = self.cascade.snapshot();
        snap.moves = self.moves;
        snap
    }
}
