//! Production TCP server for the HSM simulator.
//!
//! Wraps [`hsm_core::handle_frame`] — the sans-IO parse/dispatch/build
//! pipeline — with a `tokio` accept loop and one task per connection
//! (§4.5/§5 of the design: single-threaded cooperative dispatch per
//! connection, no cross-connection coordination beyond the immutable
//! [`hsm_core::HsmConfig`]).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use hsm_core::{HsmConfig, Lmk};
use tokio::net::TcpListener;

pub use error::ServerError;

/// Configuration for the production TCP runtime: the bind address plus
/// everything needed to build an immutable [`HsmConfig`].
#[derive(Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to, e.g. `"0.0.0.0:1500"`.
    pub bind_address: String,
    /// LMK as 32 hex characters.
    pub lmk_hex: String,
    /// Fixed per-deployment frame header. Empty means no header.
    pub header: Vec<u8>,
    /// Skip terminal-key and PVK parity checks (they never fail).
    pub skip_parity: bool,
    /// Override error codes `01`/`10` to `00` in the PIN-verification path.
    pub approve_all: bool,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{}", hsm_core::config::DEFAULT_PORT),
            lmk_hex: hsm_core::config::DEFAULT_LMK_HEX.to_string(),
            header: Vec::new(),
            skip_parity: false,
            approve_all: false,
        }
    }
}

/// A bound, not-yet-running HSM simulator server.
pub struct Server {
    listener: TcpListener,
    cfg: Arc<HsmConfig>,
}

impl Server {
    /// Parse `config` into an immutable [`HsmConfig`] and bind the
    /// listening socket.
    ///
    /// # Errors
    ///
    /// [`ServerError::Lmk`] if `config.lmk_hex` is not 32 valid hex
    /// characters; [`ServerError::Io`] if the bind fails.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let lmk = Lmk::from_hex(&config.lmk_hex)?;
        let cfg = HsmConfig::new(lmk, config.header, config.skip_parity, config.approve_all);
        let listener = TcpListener::bind(&config.bind_address).await?;
        Ok(Self { listener, cfg: Arc::new(cfg) })
    }

    /// The address the server ended up bound to (useful when binding to
    /// port 0 in tests).
    ///
    /// # Errors
    ///
    /// Propagates the underlying `TcpListener::local_addr` I/O error.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process is terminated.
    ///
    /// Each connection is handled by its own `tokio` task running
    /// [`session::handle_connection`]; a failure on one connection never
    /// affects any other (§5).
    ///
    /// # Errors
    ///
    /// Only returns `Err` if `accept` itself fails unrecoverably; per-
    /// connection errors are logged and otherwise swallowed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(addr = %self.local_addr()?, "HSM simulator listening");
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let cfg = Arc::clone(&self.cfg);
            tokio::spawn(async move {
                tracing::debug!(%peer, "connection accepted");
                if let Err(e) = session::handle_connection(stream, &cfg).await {
                    tracing::debug!(%peer, error = %e, "connection ended with an error");
                }
                tracing::debug!(%peer, "connection closed");
            });
        }
    }
}

pub use session::handle_connection;
