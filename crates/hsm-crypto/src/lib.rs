//! HSM simulator cryptographic primitives
//!
//! Pure functions only: callers provide key material and (where needed)
//! random bytes. This keeps the crypto layer deterministic and trivially
//! testable, and lets [`hsm_core`](../hsm_core/index.html) stay sans-IO.
//!
//! # Key Lifecycle
//!
//! ```text
//! LMK (16 bytes, fixed at startup)
//!        │
//!        ▼
//! DES-EDE3-ECB decrypt ──► clear working key (TPK / ZPK / ZMK / CVK / PVK)
//!        │
//!        ▼
//! DES-EDE3-ECB encrypt/decrypt ──► PIN block, PVV, CVV
//! ```
//!
//! This simulator deliberately uses simplified PVV/CVV derivations (see
//! [`pvv`] and [`cvv`]) and may skip key-parity checks when configured to.
//! It is not a cryptographically sound HSM; it exists to exercise a payment
//! switch's wire-level protocol handling.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod cvv;
mod error;
pub mod kcv;
pub mod parity;
pub mod pin;
pub mod pvv;
pub mod random;

pub use cipher::{decrypt_ede3_ecb, encrypt_ede3_ecb};
pub use error::CryptoError;
pub use kcv::key_check_value;
pub use parity::{check_odd_parity, modify_to_odd_parity};
pub use pin::extract_clear_pin;
pub use random::random_key;
