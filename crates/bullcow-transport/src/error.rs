use std::io;

/// Errors raised while listening for, upgrading or talking to clients.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listening socket could not be opened.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Accepting a TCP connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    /// The client did not complete the WebSocket upgrade.
    #[cfg(feature = "websocket")]
    #[error("handshake failed: {0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),

    /// The peer is gone; nothing more can be sent.
    #[error("connection closed")]
    Closed,

    /// A frame could not be written or read.
    #[cfg(feature = "websocket")]
    #[error("websocket: {0}")]
    Socket(#[source] tokio_tungstenite::tungstenite::Error),

    /// A binary frame whose payload is not UTF-8 text.
    #[error("frame is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
