//! `A0` — generate a random working key, optionally re-wrapped under a
//! caller-supplied ZMK/TMK.

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::response::{error_code, response_code, Response};

use super::validate::fold_crypto_result;

/// Length of a generated working key (two-key 3DES).
const GENERATED_KEY_LEN: usize = 16;
/// Length of the KCV reported alongside a `Key under ZMK` field.
const ZMK_KCV_LEN: usize = 6;

fn try_handle(cfg: &HsmConfig, zmk_tmk: Option<&[u8]>) -> Result<Response, CryptoError> {
    let clear_key = hsm_crypto::random_key(GENERATED_KEY_LEN);
    let under_lmk = envelope::encrypt_under_lmk(&cfg.lmk, &clear_key);
    let mut resp = Response::bare(response_code::A1, error_code::SUCCESS)
        .with_field("Key under LMK", envelope::u_envelope(&under_lmk));

    if let Some(zmk_field) = zmk_tmk {
        let clear_zmk = envelope::decrypt_envelope_under_lmk(zmk_field, &cfg.lmk)?;
        let under_zmk = hsm_crypto::encrypt_ede3_ecb(&clear_zmk, &clear_key)?;
        let kcv = hsm_crypto::key_check_value(&clear_key, ZMK_KCV_LEN)?;
        resp = resp.with_field("Key under ZMK", envelope::u_envelope(&under_zmk)).with_field("Key Check Value", kcv);
    }

    Ok(resp)
}

/// `A0` — generate a random key, encrypt it under the LMK, and (if a
/// ZMK/TMK envelope was supplied) also wrap it under that key.
///
/// A second call with identical input always yields a different
/// ciphertext: the key is freshly drawn from the OS CSPRNG every time
/// (§8, scenario 3).
#[must_use]
pub fn handle_a0(cfg: &HsmConfig, zmk_tmk: Option<&[u8]>) -> Response {
    fold_crypto_result(response_code::A1, cfg, try_handle(cfg, zmk_tmk))
}
