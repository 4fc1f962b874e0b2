//! The leaderboard store interface.
//!
//! Durable storage is deliberately outside the game server. Anything that
//! can list, insert and rank records can back the lobby by implementing
//! [`RecordStore`]; the server ships [`MemoryRecordStore`](crate::MemoryRecordStore).

use std::future::Future;

use bullcow_protocol::Record;

use crate::RecordError;

/// Shortest accepted player name, in characters.
pub const MIN_NAME_LEN: usize = 3;
/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Reads and writes leaderboard records.
///
/// `Send + Sync + 'static` because one store is shared by every lobby
/// connection task for the lifetime of the server.
pub trait RecordStore: Send + Sync + 'static {
    /// Returns records in insertion order. `None` or `Some(0)` returns
    /// all of them, otherwise at most `limit`.
    fn list(
        &self,
        limit: Option<usize>,
    ) -> impl Future<Output = Vec<Record>> + Send;

    /// Stores a new record and returns it with its assigned id.
    ///
    /// # Errors
    /// - [`RecordError::InvalidName`] if the name length is out of range
    /// - [`RecordError::DuplicateName`] if the name is taken
    fn create(
        &self,
        name: String,
        record: u32,
    ) -> impl Future<Output = Result<Record, RecordError>> + Send;

    /// Returns the lowest record value, or `None` when there are none.
    fn best(&self) -> impl Future<Output = Option<u32>> + Send;
}

/// Checks a player name against the length limits.
pub(crate) fn validate_name(name: &str) -> Result<(), RecordError> {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(RecordError::InvalidName {
            len,
            min: MIN_NAME_LEN,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}
