//! Encrypted-key envelope handling: scheme-tag stripping and LMK crypto.
//!
//! See the design's §9 note on envelope handling: only the `U` scheme tag
//! is ever stripped before hex-decoding; other tags (`T`/`S`/`X`) are
//! tolerated on the wire but left in place, which is intentional parser
//! behaviour, not an oversight.

use hsm_crypto::CryptoError;

use crate::lmk::Lmk;

const U_TAG: u8 = b'U';

/// Strip a leading `U` scheme tag, if present. Any other tag (or no tag)
/// is left untouched.
fn strip_u_tag(field: &[u8]) -> &[u8] {
    if field.first() == Some(&U_TAG) { &field[1..] } else { field }
}

/// Decode a (possibly `U`-tagged) ASCII-hex envelope field into raw
/// ciphertext bytes.
///
/// This is the standard envelope shape used by TPK/ZPK/CVK/ZMK fields: the
/// field is always ASCII hex, whether or not a scheme tag precedes it.
///
/// # Errors
///
/// [`CryptoError::InvalidHex`] if the (stripped) field is not valid ASCII
/// hex.
pub fn ciphertext_from_hex_field(field: &[u8]) -> Result<Vec<u8>, CryptoError> {
    hex::decode(strip_u_tag(field)).map_err(|e| CryptoError::InvalidHex { reason: e.to_string() })
}

/// Decode the `HC` command's `CurrentKey` field, which is unique in this
/// protocol: when no `U` tag is present the field is 16 *raw* ciphertext
/// bytes rather than 32 ASCII-hex characters (§4.2 table).
///
/// # Errors
///
/// [`CryptoError::InvalidHex`] if a `U`-tagged field is not valid hex.
pub fn ciphertext_from_current_key_field(field: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if field.first() == Some(&U_TAG) {
        ciphertext_from_hex_field(field)
    } else {
        Ok(field.to_vec())
    }
}

/// Decrypt an envelope field (hex ciphertext, optionally `U`-tagged) under
/// the LMK, yielding the clear working key.
///
/// # Errors
///
/// Propagates [`CryptoError`] from hex decoding or the block cipher.
pub fn decrypt_envelope_under_lmk(field: &[u8], lmk: &Lmk) -> Result<Vec<u8>, CryptoError> {
    let ciphertext = ciphertext_from_hex_field(field)?;
    hsm_crypto::decrypt_ede3_ecb(lmk.as_bytes(), &ciphertext)
}

/// Decrypt the `HC` `CurrentKey` field under the LMK (see
/// [`ciphertext_from_current_key_field`] for its wire-width quirk).
///
/// # Errors
///
/// Propagates [`CryptoError`] from hex decoding or the block cipher.
pub fn decrypt_current_key_under_lmk(field: &[u8], lmk: &Lmk) -> Result<Vec<u8>, CryptoError> {
    let ciphertext = ciphertext_from_current_key_field(field)?;
    hsm_crypto::decrypt_ede3_ecb(lmk.as_bytes(), &ciphertext)
}

/// Decode a PVK-pair field into its clear key bytes.
///
/// Unlike TPK/ZPK/CVK, a PVK pair is never itself encrypted under the LMK
/// (§3 data model): the hex decode (after stripping a `U` tag, if present)
/// yields the clear PVK bytes directly.
///
/// # Errors
///
/// [`CryptoError::InvalidHex`] if the (stripped) field is not valid ASCII
/// hex.
pub fn clear_pvk_pair(field: &[u8]) -> Result<Vec<u8>, CryptoError> {
    ciphertext_from_hex_field(field)
}

/// Encrypt `clear` under the LMK. `clear` is always 16 bytes of working
/// key material in this protocol, which is always block-aligned and
/// always paired with a valid 16-byte LMK, so this never fails in
/// practice; the cipher's `Result` is collapsed with an `unreachable!`
/// rather than threaded through every call site.
#[must_use]
pub fn encrypt_under_lmk(lmk: &Lmk, clear: &[u8]) -> Vec<u8> {
    hsm_crypto::encrypt_ede3_ecb(lmk.as_bytes(), clear)
        .unwrap_or_else(|_| unreachable!("working keys are always 16-byte, block-aligned"))
}

/// Render `ciphertext` as a `U`-tagged ASCII-hex envelope field
/// (`U` || uppercase hex).
#[must_use]
pub fn u_envelope(ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + ciphertext.len() * 2);
    out.push(U_TAG);
    out.extend_from_slice(hex::encode_upper(ciphertext).as_bytes());
    out
}
