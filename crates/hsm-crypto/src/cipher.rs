//! DES-EDE3-ECB block operations, no padding.
//!
//! All working keys in this protocol (LMK, TPK, ZPK, ZMK, CVK, PVK) are
//! 16-byte, two-key 3DES keys: `K1 || K2`. The third EDE subkey is always
//! `K1`, giving the standard 24-byte `K1 || K2 || K1` form the `des` crate
//! expects.

use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::TdesEde3;

use crate::error::CryptoError;

/// DES block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Two-key 3DES key length in bytes (`K1 || K2`).
pub const KEY_SIZE: usize = 16;

fn expand_two_key(key: &[u8]) -> Result<TdesEde3, CryptoError> {
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength { len: key.len() });
    }

    let mut expanded = [0u8; 24];
    expanded[0..16].copy_from_slice(key);
    expanded[16..24].copy_from_slice(&key[0..8]);

    Ok(TdesEde3::new_from_slice(&expanded).unwrap_or_else(|_| {
        unreachable!("24-byte buffer always matches TdesEde3's fixed key size")
    }))
}

/// Encrypt `data` under `key` using DES-EDE3-ECB with no padding.
///
/// `data` must be a non-zero multiple of [`BLOCK_SIZE`]; each 8-byte block
/// is encrypted independently (ECB has no chaining).
///
/// # Errors
///
/// - [`CryptoError::InvalidKeyLength`] if `key` is not 16 bytes.
/// - [`CryptoError::NotBlockAligned`] if `data.len()` is not a multiple of 8.
pub fn encrypt_ede3_ecb(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::NotBlockAligned { len: data.len() });
    }

    let cipher = expand_two_key(key)?;
    let mut out = data.to_vec();
    for chunk in out.chunks_mut(BLOCK_SIZE) {
        let block = cipher::generic_array::GenericArray::from_mut_slice(chunk);
        cipher.encrypt_block(block);
    }
    Ok(out)
}

/// Decrypt `data` under `key` using DES-EDE3-ECB with no padding.
///
/// # Errors
///
/// Same error conditions as [`encrypt_ede3_ecb`].
pub fn decrypt_ede3_ecb(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::NotBlockAligned { len: data.len() });
    }

    let cipher = expand_two_key(key)?;
    let mut out = data.to_vec();
    for chunk in out.chunks_mut(BLOCK_SIZE) {
        let block = cipher::generic_array::GenericArray::from_mut_slice(chunk);
        cipher.decrypt_block(block);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arbitrary_key() -> impl Strategy<Value = [u8; KEY_SIZE]> {
        prop::collection::vec(any::<u8>(), KEY_SIZE).prop_map(|v| {
            let mut arr = [0u8; KEY_SIZE];
            arr.copy_from_slice(&v);
            arr
        })
    }

    fn arbitrary_block() -> impl Strategy<Value = [u8; BLOCK_SIZE]> {
        prop::collection::vec(any::<u8>(), BLOCK_SIZE).prop_map(|v| {
            let mut arr = [0u8; BLOCK_SIZE];
            arr.copy_from_slice(&v);
            arr
        })
    }

    proptest! {
        #[test]
        fn round_trip(key in arbitrary_key(), block in arbitrary_block()) {
            let ciphertext = encrypt_ede3_ecb(&key, &block).expect("block aligned");
            let plaintext = decrypt_ede3_ecb(&key, &ciphertext).expect("block aligned");
            prop_assert_eq!(plaintext, block.to_vec());
        }

        #[test]
        fn multi_block_round_trip(key in arbitrary_key(), a in arbitrary_block(), b in arbitrary_block()) {
            let mut data = a.to_vec();
            data.extend_from_slice(&b);
            let ciphertext = encrypt_ede3_ecb(&key, &data).expect("block aligned");
            let plaintext = decrypt_ede3_ecb(&key, &ciphertext).expect("block aligned");
            prop_assert_eq!(plaintext, data);
        }
    }

    #[test]
    fn rejects_short_key() {
        let err = encrypt_ede3_ecb(&[0u8; 8], &[0u8; 8]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeyLength { len: 8 });
    }

    #[test]
    fn rejects_unaligned_block() {
        let key = [0u8; KEY_SIZE];
        let err = encrypt_ede3_ecb(&key, &[0u8; 5]).unwrap_err();
        assert_eq!(err, CryptoError::NotBlockAligned { len: 5 });
    }
}
