//! Server configuration.

use std::time::Duration;

use bullcow_room::DEFAULT_CHANNEL_SIZE;

/// Settings for a bullcow server.
///
/// Start from `ServerConfig::default()` and override what you need, or
/// set fields through [`BullcowServerBuilder`](crate::BullcowServerBuilder).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: String,

    /// Close a connection that sends nothing for this long. `None`
    /// waits forever.
    pub idle_timeout: Option<Duration>,

    /// Command queue size of each room actor.
    pub channel_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            idle_timeout: None,
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}
