//! Simplified VISA PIN Verification Value (PVV) derivation.
//!
//! This is *not* the real VISA PVV algorithm. It exists to give the
//! simulator a deterministic, reproducible stand-in that a test harness can
//! compute independently and compare byte-for-byte, matching this project's
//! non-goal of cryptographic soundness.

use crate::cipher::encrypt_ede3_ecb;
use crate::error::CryptoError;

/// Length in ASCII characters of a PVV.
pub const PVV_LEN: usize = 4;

/// Render an already-ASCII-hex-digit field (e.g. an account number or a
/// PVKI byte) as its nibble string, without re-hex-encoding the bytes.
///
/// Wire fields like `account` arrive as ASCII decimal digits (`b"123..."`),
/// which are already valid hex nibbles; `hex::encode`-ing them would
/// instead byte-hex-encode each ASCII character (`'1'` 0x31 → `"31"`),
/// which is not what §4.4's `hex(account)` means here.
fn ascii_field_as_nibbles(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

fn assemble_and_encrypt(parts: &str, key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut nibbles = parts.to_string();
    while nibbles.len() < 16 {
        nibbles.push('0');
    }
    nibbles.truncate(16);

    let block = hex::decode(&nibbles).map_err(|e| CryptoError::InvalidHex { reason: e.to_string() })?;
    encrypt_ede3_ecb(key, &block)
}

/// First `count` decimal digits encountered scanning `hex_str` left to
/// right, right-padded with `'0'` up to `count` if fewer are found.
fn take_decimal_digits(hex_str: &str, count: usize) -> String {
    let mut digits: String = hex_str.chars().filter(char::is_ascii_digit).take(count).collect();
    while digits.len() < count {
        digits.push('0');
    }
    digits
}

/// Compute the simplified PVV for (`account`, `pvki`, `pin`) under the
/// clear 16-byte PVK.
///
/// Assembly: `hex(account) || hex(pvki) || pin`, right-padded with `'0'` to
/// 16 hex nibbles and truncated to 16, interpreted as 8 raw bytes,
/// encrypted under `pvk` (the first 16 bytes of the PVK pair). The PVV is
/// the first 4 decimal digits found scanning the ciphertext's hex left to
/// right, right-padded with `'0'` if fewer than 4 exist.
///
/// # Errors
///
/// Propagates [`CryptoError`] from the underlying block cipher (invalid
/// key length).
pub fn compute_pvv(account: &[u8], pvki: u8, pin: &str, pvk: &[u8]) -> Result<String, CryptoError> {
    let assembled = format!("{}{}{}", ascii_field_as_nibbles(account), pvki as char, pin);
    let ciphertext = assemble_and_encrypt(&assembled, pvk)?;
    let ciphertext_hex = hex::encode(&ciphertext);
    Ok(take_decimal_digits(&ciphertext_hex, PVV_LEN))
}
