//! `NC`, `BU`, and `HC`: diagnostics and key-check-value handlers.

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::response::{error_code, response_code, Response};

use super::validate::select_error;

/// `NC` — report the LMK's check value and the firmware version.
///
/// Never fails: the LMK is always 16 bytes (enforced at startup by
/// [`crate::lmk::Lmk::from_hex`]), so the key-check-value derivation cannot
/// raise `InvalidKeyLength`.
#[must_use]
pub fn handle_nc(cfg: &HsmConfig) -> Response {
    let kcv = hsm_crypto::key_check_value(cfg.lmk.as_bytes(), 16)
        .unwrap_or_else(|_| unreachable!("the LMK is always exactly 16 bytes"));
    Response::bare(response_code::ND, error_code::SUCCESS)
        .with_field("LMK Check Value", kcv)
        .with_field("Firmware Version", crate::config::FIRMWARE_VERSION.to_vec())
}

/// `BU` — key check value of a supplied key.
///
/// A `U`-tagged key is hex-decoded directly (no LMK decryption: `BU`
/// checks the key material as given, not a working key under the LMK) and
/// its 16-byte KCV is emitted. No key at all is a rule-5 crypto exception.
///
/// # Errors
///
/// Propagates [`CryptoError`] from hex decoding or the KCV derivation.
pub fn try_handle_bu(cfg: &HsmConfig, key: Option<&[u8]>) -> Result<Response, CryptoError> {
    let Some(key_field) = key else {
        let code = select_error(true, cfg, error_code::MISMATCH);
        return Ok(Response::bare(response_code::BV, code));
    };

    let clear_key = envelope::ciphertext_from_hex_field(key_field)?;
    let kcv = hsm_crypto::key_check_value(&clear_key, 16)?;
    Ok(Response::bare(response_code::BV, error_code::SUCCESS).with_field("Key Check Value", kcv))
}

/// `HC` — diagnostic key check, read-only.
///
/// Decrypts the supplied key under the LMK and reports its 16-byte KCV
/// alongside the requested (and merely echoed) TMK/LMK scheme bytes.
///
/// # Errors
///
/// Propagates [`CryptoError`] from hex decoding or the block cipher.
pub fn try_handle_hc(
    cfg: &HsmConfig,
    current_key: &[u8],
    tmk_scheme: u8,
    lmk_scheme: u8,
) -> Result<Response, CryptoError> {
    let clear_key = envelope::decrypt_current_key_under_lmk(current_key, &cfg.lmk)?;
    let kcv = hsm_crypto::key_check_value(&clear_key, 16)?;
    Ok(Response::bare(response_code::HD, error_code::SUCCESS)
        .with_field("Key Check Value", kcv)
        .with_field("New Key Scheme (TMK)", vec![tmk_scheme])
        .with_field("New Key Scheme (LMK)", vec![lmk_scheme]))
}
