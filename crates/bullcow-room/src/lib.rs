//! Rooms for bullcow.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns the
//! game session for its two players.
//!
//! # Key types
//!
//! - [`score()`] — the scoring engine, a pure function
//! - [`GameSession`] — seats, secret word and the phase machine
//! - [`RoomRegistry`] — creates, resolves and removes rooms
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`Phase`] — `WaitingWord → Playing → Finished`

mod error;
mod game;
mod phase;
mod registry;
mod room;
mod score;

pub use error::RoomError;
pub use game::{GameSession, Outbound};
pub use phase::{Phase, MAX_PARTICIPANTS};
pub use registry::{RoomRegistry, DEFAULT_CHANNEL_SIZE};
pub use room::{PlayerSender, RoomHandle, RoomInfo};
pub use score::{score, Score, ScoreError};
