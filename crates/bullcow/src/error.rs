//! Unified error type for the bullcow server.

use std::time::Duration;

use bullcow_protocol::ProtocolError;
use bullcow_room::RoomError;
use bullcow_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// None of these are fatal to the server: each one ends at most the
/// connection it happened on.
#[derive(Debug, thiserror::Error)]
pub enum BullcowError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (not found, full, unavailable).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The client sent nothing within the configured idle timeout.
    #[error("connection idle for {0:?}")]
    IdleTimeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bullcow_protocol::RoomCode;

    #[test]
    fn test_from_transport_error() {
        let err: BullcowError = TransportError::Closed.into();
        assert!(matches!(err, BullcowError::Transport(_)));
        assert_eq!(err.to_string(), "connection closed");
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidRoomCode("nope".into());
        let err: BullcowError = err.into();
        assert!(matches!(err, BullcowError::Protocol(_)));
    }

    #[test]
    fn test_from_room_error() {
        let code = RoomCode::parse("abc123").unwrap();
        let err: BullcowError = RoomError::RoomFull(code).into();
        assert!(matches!(err, BullcowError::Room(_)));
        assert_eq!(err.to_string(), "room abc123 is full");
    }
}
