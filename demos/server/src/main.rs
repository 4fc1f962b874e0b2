//! Runs a bullcow server.
//!
//! ```bash
//! RUST_LOG=bullcow=debug bullcow-server --host 0.0.0.0 --port 3000
//! ```

use std::time::Duration;

use bullcow::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Two-player bulls-and-cows word game server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value_t = 3000)]
    port: u16,

    /// Close connections that send nothing for this many seconds
    #[arg(long, value_name = "SECS")]
    idle_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), BullcowError> {
    // RUST_LOG=bullcow=debug,bullcow_room=debug for per-message detail
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut builder = BullcowServer::builder()
        .bind(&format!("{}:{}", cli.host, cli.port));
    if let Some(secs) = cli.idle_timeout_secs {
        builder = builder.idle_timeout(Duration::from_secs(secs));
    }

    builder.build().await?.run().await
}
