//! Headless autoplay: picks scoring gestures by trying them on a copy of the board.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::core::{Cascade, GameConfig, GameSnapshot};
use crate::engine::{Command, GameSession, SessionEvent};
use crate::types::{SwipeDirection, VertexDirection};

/// Gestures played when `--moves` is not given
pub const DEFAULT_MAX_MOVES: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct AutoplayArgs {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub max_moves: u32,
    /// Print the final board as JSON
    pub snapshot: bool,
}

impl Default for AutoplayArgs {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: None,
            max_moves: DEFAULT_MAX_MOVES,
            snapshot: false,
        }
    }
}

pub fn parse_autoplay_args(args: &[String]) -> Result<AutoplayArgs> {
    let mut parsed = AutoplayArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                parsed.config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                parsed.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --moves"))?;
                parsed.max_moves = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --moves value: {}", v))?;
            }
            "--snapshot" => parsed.snapshot = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(parsed)
}

/// Config file (or defaults) with the command-line seed applied
///
/// A `--config` path that does not exist falls back to the defaults.
pub fn load_config(args: &AutoplayArgs) -> Result<GameConfig> {
    let mut config = match &args.config_path {
        Some(path) => GameConfig::load_or_default(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// First gesture, in slot/vertex/direction order, that scores on `cascade`
///
/// Each candidate is played on a clone, so the prediction uses the same RNG
/// draws the real board will.
pub fn find_scoring_gesture(cascade: &Cascade) -> Option<(Command, SwipeDirection)> {
    for anchor in cascade.board().positions() {
        for vertex in VertexDirection::ALL {
            let point = cascade.layout().vertex(anchor, vertex);
            for direction in [SwipeDirection::Left, SwipeDirection::Right] {
                let mut trial = cascade.clone();
                let Ok(selection) = trial.select(anchor, point) else {
                    continue;
                };
                if trial.play_gesture(&selection, direction).scored {
                    return Some((Command::Select { anchor, point }, direction));
                }
            }
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoplaySummary {
    pub gestures: u32,
    pub snapshot: GameSnapshot,
}

/// Play up to `args.max_moves` scoring gestures
pub fn run(args: &AutoplayArgs) -> Result<AutoplaySummary> {
    let config = load_config(args)?;
    let mut session = GameSession::new(config);
    let attempts = session.start()?;
    debug!(attempts, "board ready");

    let mut gestures = 0;
    while gestures < args.max_moves && !session.is_game_over() {
        let Some((select, direction)) = find_scoring_gesture(session.cascade()) else {
            info!(
                possible_moves = session.total_possible_moves(),
                "no scoring gesture left"
            );
            break;
        };

        session.submit(select);
        session.submit(Command::Swipe(direction));
        session.run_pending()?;

        for event in session.drain_events() {
            if let SessionEvent::Gesture(outcome) = event {
                debug!(
                    rounds = outcome.report.rounds,
                    cells = outcome.report.cells_cleared,
                    "cascade settled"
                );
            }
        }
        session.acknowledge();
        gestures += 1;
    }

    Ok(AutoplaySummary {
        gestures,
        snapshot: session.snapshot(),
    })
}
