//! HSM simulator server binary.
//!
//! # Usage
//!
//! ```bash
//! # Start on the default port with the default (insecure, well-known) LMK
//! hsm-server
//!
//! # Start on a custom port with a deployment-specific LMK and header
//! hsm-server --port 1501 --lmk 0123456789ABCDEF0123456789ABCDEF --header SSSS
//!
//! # Skip parity checks and approve every PIN/key verification
//! hsm-server --skip-parity --approve-all
//! ```

use clap::Parser;
use hsm_server::{Server, ServerRuntimeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Payment HSM protocol simulator.
#[derive(Parser, Debug)]
#[command(name = "hsm-server")]
#[command(about = "Simulates a payment HSM's framed command/response protocol over TCP")]
#[command(version)]
struct Args {
    /// TCP port to listen on.
    #[arg(short, long, default_value_t = hsm_core::config::DEFAULT_PORT)]
    port: u16,

    /// Local Master Key as 32 hex characters (16 bytes).
    #[arg(long, default_value_t = hsm_core::config::DEFAULT_LMK_HEX.to_string())]
    lmk: String,

    /// Fixed per-deployment frame header (ASCII), empty for none.
    #[arg(long, default_value = "")]
    header: String,

    /// Skip terminal-key and PVK parity checks (they never fail).
    #[arg(long)]
    skip_parity: bool,

    /// Override PIN-verification error codes `01`/`10` to `00`.
    #[arg(long)]
    approve_all: bool,

    /// Enable verbose (debug-level) logging; equivalent to `RUST_LOG=debug`.
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { args.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = ServerRuntimeConfig {
        bind_address: format!("0.0.0.0:{}", args.port),
        lmk_hex: args.lmk,
        header: args.header.into_bytes(),
        skip_parity: args.skip_parity,
        approve_all: args.approve_all,
    };

    tracing::info!(port = args.port, skip_parity = args.skip_parity, approve_all = args.approve_all, "starting HSM simulator");

    let server = Server::bind(config).await?;
    tracing::info!(addr = %server.local_addr()?, "HSM simulator listening");

    server.run().await?;

    Ok(())
}
