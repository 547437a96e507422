//! Key Check Value derivation.

use crate::cipher::{encrypt_ede3_ecb, BLOCK_SIZE};
use crate::error::CryptoError;

/// Compute the Key Check Value of `key`: ECB-encrypt two 8-byte zero
/// blocks under `key` and return the leading `n` raw bytes of the 16-byte
/// ciphertext.
///
/// `n` is typically 6 (classical KCV) or 16 (this simulator's `BU`/`HC`
/// commands, which preserve the source device's 16-byte KCV output rather
/// than the documented 6-byte convention — see the design notes). A
/// single zero block only yields 8 ciphertext bytes, which cannot satisfy
/// `n=16`; encrypting two zero blocks (ECB has no chaining, so both
/// blocks encrypt identically, but together they give the 16 bytes the
/// 16-byte KCV convention needs) makes every `n` in `{6, 16}` satisfiable
/// from the same derivation.
///
/// # Errors
///
/// [`CryptoError::InvalidKeyLength`] if `key` is not 16 bytes.
pub fn key_check_value(key: &[u8], n: usize) -> Result<Vec<u8>, CryptoError> {
    let zero_blocks = [0u8; 2 * BLOCK_SIZE];
    let ciphertext = encrypt_ede3_ecb(key, &zero_blocks)?;
    Ok(ciphertext.into_iter().take(n).collect())
}
