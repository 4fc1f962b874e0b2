//! `BullcowServer` builder and server loop.
//!
//! This is the entry point for running a bullcow server. It ties together
//! all the layers: transport → protocol → room registry, plus the
//! leaderboard store behind the lobby.

use std::sync::Arc;
use std::time::Duration;

use bullcow_protocol::{Codec, JsonCodec};
use bullcow_records::{MemoryRecordStore, RecordStore};
use bullcow_room::RoomRegistry;
use bullcow_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{BullcowError, ServerConfig};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The room
/// registry sits behind a single mutex; room sessions themselves are
/// serialized by their actors.
pub(crate) struct ServerState<S: RecordStore, C: Codec> {
    pub(crate) rooms: Mutex<RoomRegistry>,
    pub(crate) records: S,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Option<Duration>,
}

/// Builder for configuring and starting a bullcow server.
///
/// # Example
///
/// ```rust,no_run
/// use bullcow::prelude::*;
///
/// # async fn start() -> Result<(), BullcowError> {
/// let server = BullcowServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct BullcowServerBuilder<S = MemoryRecordStore> {
    config: ServerConfig,
    store: S,
}

impl BullcowServerBuilder {
    /// Creates a new builder with default settings and an in-memory
    /// leaderboard.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            store: MemoryRecordStore::new(),
        }
    }
}

impl<S: RecordStore> BullcowServerBuilder<S> {
    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Closes connections that stay silent for `timeout`.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = Some(timeout);
        self
    }

    /// Sets the command queue size of each room actor.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.config.channel_size = size;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Serves the leaderboard from `store` instead of the in-memory default.
    pub fn record_store<T: RecordStore>(self, store: T) -> BullcowServerBuilder<T> {
        BullcowServerBuilder {
            config: self.config,
            store,
        }
    }

    /// Binds the listener and builds the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<BullcowServer<S, JsonCodec>, BullcowError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomRegistry::with_channel_size(
                self.config.channel_size,
            )),
            records: self.store,
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
        });

        Ok(BullcowServer { transport, state })
    }
}

impl Default for BullcowServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound bullcow server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct BullcowServer<S: RecordStore, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<S, C>>,
}

impl BullcowServer<MemoryRecordStore, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> BullcowServerBuilder {
        BullcowServerBuilder::new()
    }
}

impl<S: RecordStore, C: Codec> BullcowServer<S, C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// A failing connection never stops the loop. Runs until the process
    /// is terminated.
    pub async fn run(mut self) -> Result<(), BullcowError> {
        tracing::info!(addr = ?self.local_addr().ok(), "bullcow server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
