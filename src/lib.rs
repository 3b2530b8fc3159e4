//! Hexmatch (workspace facade crate).
//!
//! Re-exports `hexmatch::{core,engine,types}` from the crates under `crates/` and
//! hosts the headless autoplay used by the default binary.

pub mod autoplay;

pub use hexmatch_core as core;
pub use hexmatch_engine as engine;
pub use hexmatch_types as types;
