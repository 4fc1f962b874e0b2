//! Wire protocol for bullcow.
//!
//! This crate defines what travels between the server and its clients:
//!
//! - **Types** ([`ServerMessage`], [`Role`], [`RoomCode`], [`Recipient`],
//!   [`LobbyRequest`], [`LobbyResponse`], [`Record`]) — the JSON shapes.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   turned into text frames and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! Inbound game traffic is raw text (a secret word or a guess) and never
//! goes through a codec; everything the server sends is a JSON object
//! tagged by `type`.
//!
//! ```text
//! Transport (text) → Protocol (ServerMessage / LobbyRequest) → Room
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    LobbyRequest, LobbyResponse, Recipient, Record, Role, RoomCode,
    ServerMessage, ROOM_CODE_ALPHABET, ROOM_CODE_LEN,
};
