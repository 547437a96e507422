//! The Local Master Key: a fixed, 16-byte, process-lifetime secret.

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors that prevent a valid [`Lmk`] from being constructed.
///
/// These are startup-time failures: the process must not bind a socket
/// with an invalid LMK (§3 of the design).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LmkError {
    /// The configured LMK string was not valid ASCII hex.
    #[error("LMK is not valid hex: {reason}")]
    InvalidHex {
        /// Underlying decode error message.
        reason: String,
    },

    /// The configured LMK string did not decode to exactly 16 bytes.
    #[error("LMK must be 16 bytes (32 hex characters), got {len} bytes")]
    WrongLength {
        /// Length of the decoded key, in bytes.
        len: usize,
    },
}

/// The Local Master Key: exactly 16 bytes, read-only after construction.
///
/// Every working key (TPK, ZPK, ZMK, CVK, PVK) that crosses the wire is
/// encrypted under this key. It is seeded once at process startup from a
/// 32-hex-character configuration string and never changes for the life
/// of the process; the in-memory bytes are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Lmk([u8; 16]);

impl Lmk {
    /// Parse a 32-hex-character string into an [`Lmk`].
    ///
    /// # Errors
    ///
    /// [`LmkError::InvalidHex`] if `hex_str` is not valid ASCII hex.
    /// [`LmkError::WrongLength`] if it does not decode to exactly 16 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self, LmkError> {
        let decoded = hex::decode(hex_str).map_err(|e| LmkError::InvalidHex { reason: e.to_string() })?;
        let len = decoded.len();
        let bytes: [u8; 16] = decoded.try_into().map_err(|_| LmkError::WrongLength { len })?;
        Ok(Self(bytes))
    }

    /// The raw 16 key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_lmk() {
        let lmk = Lmk::from_hex("deafbeedeafbeedeafbeedeafbeedeaf").unwrap();
        assert_eq!(lmk.as_bytes().len(), 16);
    }

    #[test]
    fn rejects_odd_length_hex() {
        let err = Lmk::from_hex("abc").unwrap_err();
        assert!(matches!(err, LmkError::InvalidHex { .. }));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Lmk::from_hex("aabb").unwrap_err();
        assert_eq!(err, LmkError::WrongLength { len: 2 });
    }

    #[test]
    fn rejects_non_hex_characters() {
        let err = Lmk::from_hex("zz").unwrap_err();
        assert!(matches!(err, LmkError::InvalidHex { .. }));
    }
}
