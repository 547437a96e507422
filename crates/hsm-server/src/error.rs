//! Server-level errors: configuration and transport failures that wrap
//! the sans-IO [`hsm_core::LmkError`].

use thiserror::Error;

/// Errors that can prevent the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured LMK string did not parse (§3: fatal at startup).
    #[error("invalid LMK configuration: {0}")]
    Lmk(#[from] hsm_core::LmkError),

    /// Binding the configured TCP port, or an I/O failure on an accepted
    /// connection, failed.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}
