//! ISO-0 PIN block wire encoding.
//!
//! The grammar (§4.2) takes PIN-block fields as a fixed 16-byte width, and
//! §3 is explicit that a PIN block is "8 bytes = 16 hex nibbles": the wire
//! carries the block (or its ciphertext) as 16 ASCII-hex characters, not
//! as 8 raw bytes. This module bridges that wire encoding to
//! `hsm_crypto`'s raw-byte block operations.

use hsm_crypto::CryptoError;

/// Hex-decode a 16-ASCII-hex-character wire PIN-block field into its 8 raw
/// bytes.
///
/// # Errors
///
/// [`CryptoError::InvalidHex`] if `field` is not valid ASCII hex.
pub fn from_wire(field: &[u8]) -> Result<Vec<u8>, CryptoError> {
    hex::decode(field).map_err(|e| CryptoError::InvalidHex { reason: e.to_string() })
}

/// Hex-encode 8 raw bytes (ciphertext, or a plaintext ISO-0 block) back
/// into its 16-ASCII-hex-character wire form.
#[must_use]
pub fn to_wire(bytes: &[u8]) -> Vec<u8> {
    hex::encode_upper(bytes).into_bytes()
}

/// Build a raw 8-byte ISO-0 Format 0 PIN block from clear PIN `digits`:
/// nibble 0 is the PIN length, nibbles `1..=len` are the digits, and the
/// rest are `F` padding.
///
/// # Errors
///
/// [`CryptoError::InvalidPinBlock`] if `digits.len()` is outside
/// `hsm_crypto::pin`'s `[MIN_PIN_LEN, MAX_PIN_LEN]` range.
pub fn build_iso0(digits: &str) -> Result<[u8; 8], CryptoError> {
    let len = digits.len();
    if !(hsm_crypto::pin::MIN_PIN_LEN..=hsm_crypto::pin::MAX_PIN_LEN).contains(&len) {
        return Err(CryptoError::InvalidPinBlock { reason: format!("PIN length {len} out of range") });
    }

    let mut nibbles = format!("{len:X}{digits}");
    while nibbles.len() < 16 {
        nibbles.push('F');
    }

    let bytes = hex::decode(&nibbles).map_err(|e| CryptoError::InvalidHex { reason: e.to_string() })?;
    Ok(bytes.try_into().unwrap_or_else(|_| unreachable!("16 hex nibbles always decode to 8 bytes")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let raw = [0xAAu8; 8];
        let wire = to_wire(&raw);
        assert_eq!(wire.len(), 16);
        assert_eq!(from_wire(&wire).unwrap(), raw.to_vec());
    }

    #[test]
    fn build_iso0_pads_with_f() {
        let block = build_iso0("1234").unwrap();
        assert_eq!(hex::encode_upper(block), "41234FFFFFFFFFFF");
    }

    #[test]
    fn build_iso0_rejects_out_of_range_length() {
        assert!(build_iso0("123").is_err());
        assert!(build_iso0("1234567890123").is_err());
    }
}
