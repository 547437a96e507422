//! Random working-key generation.

use rand::RngCore;

use crate::parity::modify_key_to_odd_parity;

/// Default key length for [`random_key`] (two-key 3DES).
pub const DEFAULT_KEY_LEN: usize = 16;

/// Draw `len` cryptographically random bytes and force odd parity on every
/// byte.
///
/// Uses the OS-backed CSPRNG (`rand::rngs::OsRng`), which is safe to call
/// concurrently from multiple connection tasks without external locking.
#[must_use]
pub fn random_key(len: usize) -> Vec<u8> {
    let mut key = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut key);
    modify_key_to_odd_parity(&mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::check_key_parity;

    #[test]
    fn random_key_has_requested_length_and_parity() {
        let key = random_key(DEFAULT_KEY_LEN);
        assert_eq!(key.len(), DEFAULT_KEY_LEN);
        assert!(check_key_parity(&key));
    }

    #[test]
    fn successive_keys_differ() {
        let a = random_key(DEFAULT_KEY_LEN);
        let b = random_key(DEFAULT_KEY_LEN);
        assert_ne!(a, b, "two random draws collided; RNG is broken");
    }
}
