//! Transport layer for bullcow.
//!
//! The rest of the server only ever sees a [`Connection`]: an established,
//! bidirectional text channel carrying a stable [`ConnectionId`] and the
//! request path the client connected with. A [`Transport`] produces them.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one accepted connection.
///
/// Room membership is keyed by this, never by socket address. Ids handed
/// out by [`ConnectionId::allocate`] are unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a raw id. Mostly useful in tests.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates a fresh, process-unique id.
    pub fn allocate() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Something that hands out client connections.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Waits for the next client and completes its upgrade.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// The address actually bound, useful after binding port 0.
    fn local_addr(&self) -> std::io::Result<std::net::SocketAddr>;
}

/// One client, exchanging text frames.
///
/// `send` and `recv` take `&self` and may run concurrently from the same
/// task, e.g. inside `tokio::select!`.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes one text frame.
    async fn send(&self, text: &str) -> Result<(), Self::Error>;

    /// Reads the next text frame. `Ok(None)` means the client closed
    /// cleanly.
    async fn recv(&self) -> Result<Option<String>, Self::Error>;

    /// Starts a clean close.
    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;

    /// Request path used for the upgrade, e.g. `/ws/ab12cd`.
    fn path(&self) -> &str;
}
