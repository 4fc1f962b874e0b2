//! Leaderboard records for bullcow.
//!
//! The leaderboard is a collaborator of the game, not part of it: rooms
//! never touch it. Clients read and write it through the lobby channel.
//!
//! - [`RecordStore`] — the pluggable store interface
//! - [`MemoryRecordStore`] — an in-process implementation

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod store;

pub use error::RecordError;
pub use memory::MemoryRecordStore;
pub use store::{RecordStore, MAX_NAME_LEN, MIN_NAME_LEN};
