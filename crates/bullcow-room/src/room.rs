//! Room actor: an isolated Tokio task that owns one [`GameSession`].
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. Commands are handled one at a time, so a
//! departure can never interleave with a half-applied guess.

use std::collections::HashMap;

use bullcow_protocol::{Recipient, Role, RoomCode, ServerMessage};
use bullcow_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::game::{GameSession, Outbound};
use crate::{Phase, RoomError};

/// Channel sender for delivering outbound messages to a participant.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the caller
/// sends a command and waits for the answer on it.
pub(crate) enum RoomCommand {
    /// Seat a participant.
    Join {
        conn: ConnectionId,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<Role, RoomError>>,
    },

    /// Remove a participant. Replies with how many remain.
    Leave {
        conn: ConnectionId,
        reply: oneshot::Sender<Result<usize, RoomError>>,
    },

    /// Deliver one inbound line from a participant.
    Message { conn: ConnectionId, text: String },

    /// Request a snapshot of the room.
    GetInfo { reply: oneshot::Sender<RoomInfo> },

    /// Shut down the room.
    Shutdown,
}

/// A snapshot of room metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub phase: Phase,
    pub participants: usize,
    pub attempts: u32,
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone. The registry holds one per room and each connection
/// handler keeps its own copy for the lifetime of its membership.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    fn unavailable(&self) -> RoomError {
        RoomError::Unavailable(self.code.clone())
    }

    /// Asks the room to seat `conn`. On success the `role` message has
    /// already been queued on `sender`.
    pub async fn join(
        &self,
        conn: ConnectionId,
        sender: PlayerSender,
    ) -> Result<Role, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                conn,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| self.unavailable())?;
        reply_rx.await.map_err(|_| self.unavailable())?
    }

    /// Removes `conn` from the room and returns the remaining head count.
    pub async fn leave(&self, conn: ConnectionId) -> Result<usize, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                conn,
                reply: reply_tx,
            })
            .await
            .map_err(|_| self.unavailable())?;
        reply_rx.await.map_err(|_| self.unavailable())?
    }

    /// Forwards an inbound line to the room (fire-and-forget).
    pub async fn send_message(
        &self,
        conn: ConnectionId,
        text: String,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Message { conn, text })
            .await
            .map_err(|_| self.unavailable())
    }

    /// Requests a snapshot of the room.
    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| self.unavailable())?;
        reply_rx.await.map_err(|_| self.unavailable())
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| self.unavailable())
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    code: RoomCode,
    session: GameSession,
    /// Per-participant outbound channels.
    senders: HashMap<ConnectionId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::debug!(room = %self.code, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    conn,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(conn, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { conn, reply } => {
                    let result = self.handle_leave(conn);
                    let _ = reply.send(result);
                }
                RoomCommand::Message { conn, text } => {
                    self.handle_message(conn, &text);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => break,
            }
        }

        tracing::debug!(room = %self.code, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        conn: ConnectionId,
        sender: PlayerSender,
    ) -> Result<Role, RoomError> {
        let role = self
            .session
            .join(conn)
            .ok_or_else(|| RoomError::RoomFull(self.code.clone()))?;

        let _ = sender.send(ServerMessage::Role {
            role,
            message: format!("You are player {role}"),
        });
        self.senders.insert(conn, sender);

        tracing::info!(
            room = %self.code,
            %conn,
            %role,
            players = self.session.participant_count(),
            "player joined"
        );
        Ok(role)
    }

    fn handle_leave(&mut self, conn: ConnectionId) -> Result<usize, RoomError> {
        let (role, notices) = self
            .session
            .leave(conn)
            .ok_or_else(|| RoomError::NotInRoom(conn, self.code.clone()))?;
        self.senders.remove(&conn);

        tracing::info!(
            room = %self.code,
            %conn,
            %role,
            players = self.session.participant_count(),
            "player left"
        );

        self.dispatch(conn, notices);
        Ok(self.session.participant_count())
    }

    fn handle_message(&mut self, conn: ConnectionId, text: &str) {
        let Some(role) = self.session.role_of(conn) else {
            tracing::warn!(
                room = %self.code,
                %conn,
                "message from non-member, ignoring"
            );
            return;
        };

        let before = self.session.phase();
        let out = self.session.handle_message(role, text);
        let after = self.session.phase();

        self.dispatch(conn, out);

        if before != after {
            match after {
                Phase::Playing => tracing::info!(room = %self.code, "game started"),
                Phase::Finished => tracing::info!(
                    room = %self.code,
                    attempts = self.session.attempts(),
                    "game finished"
                ),
                Phase::WaitingWord => {}
            }
        }
    }

    /// Delivers outbound messages relative to `origin`, the connection
    /// whose action produced them.
    fn dispatch(&self, origin: ConnectionId, msgs: Outbound) {
        for (recipient, msg) in msgs {
            match recipient {
                Recipient::Sender => self.send_to(origin, msg),
                Recipient::Other => {
                    for conn in self.session.participants() {
                        if conn != origin {
                            self.send_to(conn, msg.clone());
                        }
                    }
                }
                Recipient::Both => {
                    for conn in self.session.participants() {
                        self.send_to(conn, msg.clone());
                    }
                }
            }
        }
    }

    /// Sends an outbound message to a single participant. Silently drops
    /// it if the receiver is gone; that never affects session state.
    fn send_to(&self, conn: ConnectionId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&conn) {
            if sender.send(msg).is_err() {
                tracing::debug!(room = %self.code, %conn, "outbound channel closed");
            }
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            phase: self.session.phase(),
            participants: self.session.participant_count(),
            attempts: self.session.attempts(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate with it.
///
/// `channel_size` bounds the command queue; senders wait when it is full.
pub(crate) fn spawn_room(code: RoomCode, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        code: code.clone(),
        session: GameSession::new(),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
