//! Errors for frame and command-grammar parsing.

use thiserror::Error;

/// Errors that abort parsing of an incoming frame.
///
/// Every variant here is fatal to the connection (§7 of the design): once
/// framing is lost there is no in-band way to resynchronise with the peer,
/// so the session layer closes the socket without sending a reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer was too short to contain even the 2-byte length prefix, the
    /// configured header, or the 2-byte command code.
    #[error("short frame: need at least {expected} bytes, got {actual}")]
    ShortFrame {
        /// Minimum bytes required at the point of failure.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The declared `length` field did not match `bytes.len() - 2`.
    #[error("malformed frame: declared length {declared} does not match body length {actual}")]
    MalformedFrame {
        /// Length encoded in the frame's 2-byte prefix.
        declared: usize,
        /// Actual number of bytes following the prefix.
        actual: usize,
    },

    /// The configured header did not byte-compare equal to the bytes on
    /// the wire.
    #[error("header mismatch")]
    BadHeader,

    /// A command's grammar requires a delimiter (e.g. `;`) that was not
    /// found in the payload.
    #[error("malformed command: expected delimiter {delimiter:#04x} not found")]
    MalformedCommand {
        /// The delimiter byte that was expected.
        delimiter: u8,
    },

    /// An envelope or fixed-width field ran past the end of the payload.
    #[error("short field: field {field} needs {expected} bytes, only {actual} remain")]
    ShortField {
        /// Name of the field being parsed.
        field: &'static str,
        /// Bytes the field requires.
        expected: usize,
        /// Bytes actually remaining in the payload.
        actual: usize,
    },
}
