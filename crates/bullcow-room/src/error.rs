//! Error types for the room layer.

use bullcow_protocol::RoomCode;
use bullcow_transport::ConnectionId;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No live room has this code.
    #[error("room {0} does not exist")]
    NotFound(RoomCode),

    /// Both seats of the room are taken.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The connection is not a participant of this room.
    #[error("{0} is not in room {1}")]
    NotInRoom(ConnectionId, RoomCode),

    /// The room's actor has stopped or its command channel is closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}
