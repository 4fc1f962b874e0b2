//! Room registry: allocates room codes, owns room lifetimes and routes
//! connections into rooms.

use std::collections::HashMap;

use bullcow_protocol::{Role, RoomCode};
use bullcow_transport::ConnectionId;

use crate::room::spawn_room;
use crate::{PlayerSender, RoomError, RoomHandle, RoomInfo};

/// Default command channel size for room actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Maps live room codes to their room actors.
///
/// `RoomRegistry` is not synchronized itself. The server keeps exactly
/// one behind a single mutex; joins and leaves run while that lock is
/// held so an emptied room is removed before anyone else can resolve it.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, RoomHandle>,
    channel_size: usize,
}

impl RoomRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::with_channel_size(DEFAULT_CHANNEL_SIZE)
    }

    /// Creates a registry whose room actors queue up to `channel_size`
    /// commands.
    pub fn with_channel_size(channel_size: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            channel_size: channel_size.max(1),
        }
    }

    /// Creates a new room waiting for its secret word and returns its code.
    ///
    /// Draws random codes until one is not in use, yielding to the runtime
    /// between collisions.
    pub async fn create_room(&mut self) -> RoomCode {
        let code = loop {
            let candidate = RoomCode::generate(&mut rand::rng());
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!(room = %candidate, "room code collision, retrying");
            tokio::task::yield_now().await;
        };

        let handle = spawn_room(code.clone(), self.channel_size);
        self.rooms.insert(code.clone(), handle);
        tracing::info!(room = %code, "room created");
        code
    }

    /// Looks a room up without changing anything.
    pub fn resolve(&self, code: &RoomCode) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Removes a room and stops its actor.
    pub async fn remove(&mut self, code: &RoomCode) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;

        // The actor may already be gone; the entry is removed either way.
        let _ = handle.shutdown().await;

        tracing::info!(room = %code, "room removed");
        Ok(())
    }

    /// Seats `conn` in the room and returns a handle to it plus the role
    /// it was given.
    ///
    /// # Errors
    /// [`RoomError::NotFound`] for an unknown code, [`RoomError::RoomFull`]
    /// when both seats are taken.
    pub async fn join(
        &mut self,
        code: &RoomCode,
        conn: ConnectionId,
        sender: PlayerSender,
    ) -> Result<(RoomHandle, Role), RoomError> {
        let handle = self.resolve(code)?;
        let role = match handle.join(conn, sender).await {
            Ok(role) => role,
            // A room whose actor died is as good as gone.
            Err(RoomError::Unavailable(_)) => {
                self.rooms.remove(code);
                return Err(RoomError::NotFound(code.clone()));
            }
            Err(e) => return Err(e),
        };
        Ok((handle, role))
    }

    /// Takes `conn` out of its room, removing the room once it is empty.
    /// Returns the number of participants left behind.
    pub async fn leave(
        &mut self,
        code: &RoomCode,
        conn: ConnectionId,
    ) -> Result<usize, RoomError> {
        let handle = self.resolve(code)?;
        let remaining = handle.leave(conn).await?;
        if remaining == 0 {
            self.remove(code).await?;
        }
        Ok(remaining)
    }

    /// Returns a snapshot of a room.
    pub async fn room_info(&self, code: &RoomCode) -> Result<RoomInfo, RoomError> {
        self.resolve(code)?.get_info().await
    }

    /// Returns `true` if a live room has this code.
    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    /// Returns the number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
