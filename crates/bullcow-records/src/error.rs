//! Error types for the leaderboard.

/// Errors that can occur when writing a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The name is shorter or longer than allowed.
    #[error("name must be between {min} and {max} characters, got {len}")]
    InvalidName { len: usize, min: usize, max: usize },

    /// A record with this name already exists.
    #[error("a record named {0:?} already exists")]
    DuplicateName(String),
}
