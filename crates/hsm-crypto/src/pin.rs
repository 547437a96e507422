//! ISO Format 0 PIN block digit extraction.

use crate::error::CryptoError;

/// Minimum PIN length accepted in an ISO-0 block.
pub const MIN_PIN_LEN: usize = 4;

/// Maximum PIN length accepted in an ISO-0 block.
pub const MAX_PIN_LEN: usize = 12;

/// Extract the clear PIN digits from an 8-byte ISO Format 0 PIN block.
///
/// Layout: nibble 0 is the PIN length `N` in `[4, 12]`; nibbles `1..=N` are
/// the PIN digits; the remaining nibbles are padding and are ignored.
///
/// Note: this simulator extracts digits straight from the PIN block and
/// does not XOR in the account-number pad the real ISO-0 format applies
/// before transmission, matching the deliberately simplified PIN handling
/// described for this simulator.
///
/// # Errors
///
/// [`CryptoError::InvalidPinBlock`] if the block is not 8 bytes, the length
/// nibble is outside `[4, 12]`, or any of the first `N` digit nibbles is
/// not `0..=9`.
pub fn extract_clear_pin(pin_block: &[u8]) -> Result<String, CryptoError> {
    if pin_block.len() != 8 {
        return Err(CryptoError::InvalidPinBlock {
            reason: format!("expected 8-byte PIN block, got {} bytes", pin_block.len()),
        });
    }

    let hex = hex::encode_upper(pin_block);
    let nibbles: Vec<char> = hex.chars().collect();

    let len_nibble = nibbles[0];
    let len = len_nibble.to_digit(16).ok_or_else(|| CryptoError::InvalidPinBlock {
        reason: format!("length nibble '{len_nibble}' is not hex"),
    })? as usize;

    if !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&len) {
        return Err(CryptoError::InvalidPinBlock {
            reason: format!("PIN length {len} out of range [{MIN_PIN_LEN}, {MAX_PIN_LEN}]"),
        });
    }

    let digits: String = nibbles[1..=len].iter().collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CryptoError::InvalidPinBlock {
            reason: format!("non-digit nibble found in PIN digits '{digits}'"),
        });
    }

    Ok(digits)
}
