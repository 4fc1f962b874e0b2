//! # bullcow
//!
//! A two-player bulls-and-cows word game served over WebSockets.
//!
//! One player picks a secret word, the other guesses it. Every guess is
//! scored with *bulls* (letters the guess shares with the secret, counted
//! with multiplicity) and *cows* (letters in the right position). Rooms are
//! ephemeral: they are created from the lobby, hold exactly two players
//! and vanish once the last one leaves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bullcow::prelude::*;
//!
//! # async fn start() -> Result<(), BullcowError> {
//! let server = BullcowServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```
//!
//! Clients open `/lobby` to create a room, then both players connect to
//! `/ws/<room code>`.

mod config;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::BullcowError;
pub use server::{BullcowServer, BullcowServerBuilder};

pub mod prelude {
    pub use crate::{
        BullcowError, BullcowServer, BullcowServerBuilder, ServerConfig,
    };
    pub use bullcow_protocol::{
        Codec, JsonCodec, LobbyRequest, LobbyResponse, Record, Role,
        RoomCode, ServerMessage,
    };
    pub use bullcow_records::{MemoryRecordStore, RecordError, RecordStore};
}
