//! Per-connection handlers: routing, the game channel and the lobby.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The request path picks the endpoint:
//!   - `/lobby` → lobby requests (room creation, leaderboard)
//!   - `/ws/<code>` or `/<code>` → seat in that room, then relay text
//!     frames to the room actor and its messages back to the client
//!   - anything else → `error` message, then close

use std::sync::Arc;
use std::time::Duration;

use bullcow_protocol::{
    Codec, LobbyRequest, LobbyResponse, RoomCode, ServerMessage,
};
use bullcow_records::RecordStore;
use bullcow_room::RoomError;
use bullcow_transport::{Connection, ConnectionId, TransportError};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::BullcowError;

const ROOM_NOT_FOUND: &str = "room does not exist";
const ROOM_FULL: &str = "room full";

/// Where a connection asked to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Lobby,
    Room(RoomCode),
    /// A path that can never name a live room.
    Unknown(String),
}

impl Route {
    pub(crate) fn parse(path: &str) -> Self {
        // The query string plays no part in routing.
        let path = path.split('?').next().unwrap_or_default();
        if path == "/lobby" {
            return Route::Lobby;
        }
        let code = path
            .strip_prefix("/ws/")
            .or_else(|| path.strip_prefix('/'))
            .unwrap_or(path);
        match RoomCode::parse(code) {
            Ok(code) => Route::Room(code),
            Err(_) => Route::Unknown(path.to_string()),
        }
    }
}

/// Drop guard that takes a participant out of its room when the handler
/// exits.
///
/// This ensures cleanup happens even if the handler panics. Since `Drop`
/// is synchronous, we spawn a fire-and-forget task for the async lock.
struct MembershipGuard<S: RecordStore, C: Codec> {
    code: RoomCode,
    conn_id: ConnectionId,
    state: Arc<ServerState<S, C>>,
}

impl<S: RecordStore, C: Codec> Drop for MembershipGuard<S, C> {
    fn drop(&mut self) {
        let code = self.code.clone();
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut rooms = state.rooms.lock().await;
            if let Err(e) = rooms.leave(&code, conn_id).await {
                tracing::debug!(room = %code, %conn_id, error = %e, "leave failed");
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<T, S, C>(
    conn: T,
    state: Arc<ServerState<S, C>>,
) -> Result<(), BullcowError>
where
    T: Connection<Error = TransportError>,
    S: RecordStore,
    C: Codec,
{
    let conn_id = conn.id();
    tracing::debug!(%conn_id, path = conn.path(), "handling new connection");

    let result = match Route::parse(conn.path()) {
        Route::Lobby => handle_lobby(&conn, &state).await,
        Route::Room(code) => handle_room(&conn, &state, code).await,
        Route::Unknown(path) => {
            tracing::debug!(%conn_id, %path, "no room at this path");
            send_error(&conn, &state.codec, ROOM_NOT_FOUND).await
        }
    };

    // The peer may already be gone.
    let _ = conn.close().await;
    result
}

/// Seats the connection in `code` and relays traffic until either side
/// goes away.
async fn handle_room<T, S, C>(
    conn: &T,
    state: &Arc<ServerState<S, C>>,
    code: RoomCode,
) -> Result<(), BullcowError>
where
    T: Connection<Error = TransportError>,
    S: RecordStore,
    C: Codec,
{
    let conn_id = conn.id();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Lock only for the join itself, drop before network I/O.
    let joined = {
        let mut rooms = state.rooms.lock().await;
        rooms.join(&code, conn_id, tx).await
    };

    let room = match joined {
        Ok((room, role)) => {
            tracing::debug!(room = %code, %conn_id, %role, "seated");
            room
        }
        Err(RoomError::NotFound(_)) => {
            tracing::debug!(room = %code, %conn_id, "room does not exist");
            return send_error(conn, &state.codec, ROOM_NOT_FOUND).await;
        }
        Err(RoomError::RoomFull(_)) => {
            tracing::debug!(room = %code, %conn_id, "room full");
            return send_error(conn, &state.codec, ROOM_FULL).await;
        }
        Err(e) => return Err(e.into()),
    };

    let _guard = MembershipGuard {
        code: code.clone(),
        conn_id,
        state: Arc::clone(state),
    };

    loop {
        tokio::select! {
            inbound = recv_within(conn, state.idle_timeout) => {
                let text = match inbound {
                    Ok(Some(text)) => text,
                    Ok(None) => {
                        tracing::info!(room = %code, %conn_id, "connection closed cleanly");
                        break;
                    }
                    Err(e) => {
                        tracing::info!(room = %code, %conn_id, error = %e, "connection lost");
                        break;
                    }
                };
                tracing::debug!(room = %code, %conn_id, %text, "inbound");
                if let Err(e) = room.send_message(conn_id, text).await {
                    tracing::debug!(room = %code, %conn_id, error = %e, "room gone");
                    break;
                }
            }
            Some(msg) = rx.recv() => {
                let text = state.codec.encode(&msg)?;
                if let Err(e) = conn.send(&text).await {
                    tracing::debug!(room = %code, %conn_id, error = %e, "send failed");
                    break;
                }
            }
        }
    }

    // _guard drops here → the room learns about the departure.
    Ok(())
}

/// Answers lobby requests until the client goes away.
async fn handle_lobby<T, S, C>(
    conn: &T,
    state: &Arc<ServerState<S, C>>,
) -> Result<(), BullcowError>
where
    T: Connection<Error = TransportError>,
    S: RecordStore,
    C: Codec,
{
    let conn_id = conn.id();

    loop {
        let text = match recv_within(conn, state.idle_timeout).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(%conn_id, "lobby connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "lobby connection lost");
                break;
            }
        };

        let response = match state.codec.decode::<LobbyRequest>(&text) {
            Ok(request) => serve_lobby(state, request).await,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "invalid lobby request");
                LobbyResponse::Error {
                    message: e.to_string(),
                }
            }
        };

        let text = state.codec.encode(&response)?;
        conn.send(&text).await?;
    }

    Ok(())
}

/// Executes one lobby request.
async fn serve_lobby<S: RecordStore, C: Codec>(
    state: &ServerState<S, C>,
    request: LobbyRequest,
) -> LobbyResponse {
    match request {
        LobbyRequest::CreateRoom => {
            let room_id = state.rooms.lock().await.create_room().await;
            LobbyResponse::RoomCreated { room_id }
        }
        LobbyRequest::ListRecords { n } => LobbyResponse::Records {
            records: state.records.list(n).await,
        },
        LobbyRequest::CreateRecord { name, record } => {
            match state.records.create(name, record).await {
                Ok(record) => LobbyResponse::RecordCreated { record },
                Err(e) => LobbyResponse::Error {
                    message: e.to_string(),
                },
            }
        }
        LobbyRequest::BestRecord => LobbyResponse::BestRecord {
            record: state.records.best().await,
        },
    }
}

/// Receives the next frame, giving up after `idle` if one is set.
async fn recv_within<T>(
    conn: &T,
    idle: Option<Duration>,
) -> Result<Option<String>, BullcowError>
where
    T: Connection<Error = TransportError>,
{
    match idle {
        Some(limit) => match tokio::time::timeout(limit, conn.recv()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(BullcowError::IdleTimeout(limit)),
        },
        None => Ok(conn.recv().await?),
    }
}

/// Sends a terminal `error` message to the client.
async fn send_error<T>(
    conn: &T,
    codec: &impl Codec,
    message: &str,
) -> Result<(), BullcowError>
where
    T: Connection<Error = TransportError>,
{
    let text = codec.encode(&ServerMessage::Error {
        message: message.to_string(),
    })?;
    conn.send(&text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> RoomCode {
        RoomCode::parse(s).unwrap()
    }

    #[test]
    fn test_route_lobby() {
        assert_eq!(Route::parse("/lobby"), Route::Lobby);
        assert_eq!(Route::parse("/lobby?x=1"), Route::Lobby);
    }

    #[test]
    fn test_route_room_with_and_without_prefix() {
        assert_eq!(Route::parse("/ws/ab12cd"), Route::Room(code("ab12cd")));
        assert_eq!(Route::parse("/ab12cd"), Route::Room(code("ab12cd")));
    }

    #[test]
    fn test_route_malformed_code_is_unknown() {
        assert!(matches!(Route::parse("/"), Route::Unknown(_)));
        assert!(matches!(Route::parse("/ws/"), Route::Unknown(_)));
        assert!(matches!(Route::parse("/ws/AB12CD"), Route::Unknown(_)));
        assert!(matches!(Route::parse("/ws/abc"), Route::Unknown(_)));
        assert!(matches!(Route::parse("/rooms/ab12cd"), Route::Unknown(_)));
    }
}
