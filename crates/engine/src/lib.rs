//! Engine module - drives a board from player commands
//!
//! [`GameSession`] owns the [`Cascade`](hexmatch_core::Cascade) and is its only
//! writer. Input arrives as [`Command`]s, which are queued by
//! [`GameSession::submit`] and applied one per [`GameSession::tick`]. While a
//! gesture is being shown the session is busy and new input is dropped.

pub mod session;

pub use session::{Command, GameSession, SessionError, SessionEvent};
