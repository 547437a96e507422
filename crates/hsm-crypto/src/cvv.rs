//! Simplified CVV2 derivation.
//!
//! As with [`crate::pvv`], this is a simulator-only stand-in, not the real
//! CVV2 algorithm; see the crate-level docs for the project's cryptographic
//! non-goals.

use crate::cipher::encrypt_ede3_ecb;
use crate::error::CryptoError;

/// Length in ASCII characters of a CVV.
pub const CVV_LEN: usize = 3;

fn take_decimal_digits(hex_str: &str, count: usize) -> String {
    let mut digits: String = hex_str.chars().filter(char::is_ascii_digit).take(count).collect();
    while digits.len() < count {
        digits.push('0');
    }
    digits
}

/// Render an already-ASCII-hex-digit field (account/expiry/service code)
/// as its nibble string, without re-hex-encoding the bytes. See
/// `hsm_crypto::pvv`'s `ascii_field_as_nibbles`, which this mirrors.
fn ascii_field_as_nibbles(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Compute the simplified CVV for (`account`, `expiry`, `service_code`)
/// under the clear 16-byte CVK.
///
/// Assembly: `hex(account) || hex(expiry) || hex(service_code)`,
/// right-padded with `'0'` to 16 hex nibbles and truncated to 16,
/// interpreted as 8 raw bytes, encrypted under `cvk`. The CVV is the first
/// 3 decimal digits found scanning the ciphertext's hex left to right,
/// right-padded with `'0'` if fewer than 3 exist.
///
/// # Errors
///
/// Propagates [`CryptoError`] from the underlying block cipher (invalid
/// key length).
pub fn compute_cvv(
    account: &[u8],
    expiry: &[u8],
    service_code: &[u8],
    cvk: &[u8],
) -> Result<String, CryptoError> {
    let mut nibbles =
        format!("{}{}{}", ascii_field_as_nibbles(account), ascii_field_as_nibbles(expiry), ascii_field_as_nibbles(service_code));
    while nibbles.len() < 16 {
        nibbles.push('0');
    }
    nibbles.truncate(16);

    let block = hex::decode(&nibbles).map_err(|e| CryptoError::InvalidHex { reason: e.to_string() })?;
    let ciphertext = encrypt_ede3_ecb(cvk, &block)?;
    let ciphertext_hex = hex::encode(&ciphertext);
    Ok(take_decimal_digits(&ciphertext_hex, CVV_LEN))
}
