//! Hexmatch runner (default binary).
//!
//! Plays a seeded game headlessly, choosing gestures that score, and logs the
//! result. Set `RUST_LOG=debug` to follow every cascade.
//!
//! ```text
//! hexmatch [--config game.toml] [--seed N] [--moves N] [--snapshot]
//! ```

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hexmatch::autoplay::{self, parse_autoplay_args};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_autoplay_args(&args)?;

    let summary = autoplay::run(&args)?;
    let snap = &summary.snapshot;
    info!(
        gestures = summary.gestures,
        score = snap.score,
        moves = snap.moves,
        possible_moves = snap.possible_moves,
        game_over = snap.game_over(),
        "autoplay finished"
    );

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(snap)?);
    }
    Ok(())
}
