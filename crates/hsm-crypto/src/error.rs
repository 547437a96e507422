//! Error types for crypto and derivation operations.

use thiserror::Error;

/// Errors raised by the cipher, parity, and derivation helpers.
///
/// Every variant here is a handler-level "crypto exception" in the sense of
/// the HSM command grammar: callers in `hsm-core` fold any of these into
/// the command's designated error code (`01` unless overridden by
/// `approve_all`) rather than propagating a Rust panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input to a block operation was not a multiple of the DES block size
    /// (8 bytes).
    #[error("block input not 8-byte aligned: got {len} bytes")]
    NotBlockAligned {
        /// Length of the offending buffer.
        len: usize,
    },

    /// Key material was not exactly 16 bytes (two-key 3DES).
    #[error("invalid key length: expected 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Length of the offending key buffer.
        len: usize,
    },

    /// Bytes could not be decoded as ASCII hex.
    #[error("invalid hex: {reason}")]
    InvalidHex {
        /// Underlying decode error message.
        reason: String,
    },

    /// ISO-0 PIN block failed to decode (length nibble out of range or a
    /// non-digit nibble inside the declared PIN length).
    #[error("invalid PIN block: {reason}")]
    InvalidPinBlock {
        /// Human-readable reason.
        reason: String,
    },
}
