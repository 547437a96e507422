//! `CW`/`CY` — generate and verify a card's CVV under a Card Verification
//! Key.
//!
//! A CVK parity failure is never overridden by `approve_all` on either
//! command: the design's §7 asymmetry note calls this out explicitly for
//! `CY`, and `CW` shares the same validation step, so the two are treated
//! identically here.

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::response::{error_code, response_code, Response};

use super::validate::{fold_crypto_result, parity_ok, select_error};

/// `approve_all` never overrides a CVK parity failure (§7).
const CVK_PARITY_OVERRIDABLE: bool = false;

fn decrypt_cvk(cfg: &HsmConfig, cvk_field: &[u8]) -> Result<Vec<u8>, CryptoError> {
    envelope::decrypt_envelope_under_lmk(cvk_field, &cfg.lmk)
}

fn try_handle_cw(
    cfg: &HsmConfig,
    cvk_field: &[u8],
    pan: &[u8],
    expiry: &[u8],
    service_code: &[u8],
) -> Result<Response, CryptoError> {
    let clear_cvk = decrypt_cvk(cfg, cvk_field)?;
    if !parity_ok(cfg, &clear_cvk) {
        let code = select_error(CVK_PARITY_OVERRIDABLE, cfg, error_code::TERMINAL_KEY_PARITY);
        return Ok(Response::bare(response_code::CX, code));
    }

    let cvv = hsm_crypto::cvv::compute_cvv(pan, expiry, service_code, &clear_cvk)?;
    Ok(Response::bare(response_code::CX, error_code::SUCCESS).with_field("CVV", cvv.into_bytes()))
}

/// `CW` — generate a CVV for (`pan`, `expiry`, `service_code`) under `cvk`.
#[must_use]
pub fn handle_cw(cfg: &HsmConfig, cvk_field: &[u8], pan: &[u8], expiry: &[u8], service_code: &[u8]) -> Response {
    fold_crypto_result(response_code::CX, cfg, try_handle_cw(cfg, cvk_field, pan, expiry, service_code))
}

fn try_handle_cy(
    cfg: &HsmConfig,
    cvk_field: &[u8],
    supplied_cvv: &[u8],
    pan: &[u8],
    expiry: &[u8],
    service_code: &[u8],
) -> Result<Response, CryptoError> {
    let clear_cvk = decrypt_cvk(cfg, cvk_field)?;
    if !parity_ok(cfg, &clear_cvk) {
        let code = select_error(CVK_PARITY_OVERRIDABLE, cfg, error_code::TERMINAL_KEY_PARITY);
        return Ok(Response::bare(response_code::CZ, code));
    }

    let expected = hsm_crypto::cvv::compute_cvv(pan, expiry, service_code, &clear_cvk)?;
    let code =
        if expected.as_bytes() == supplied_cvv { error_code::SUCCESS } else { select_error(true, cfg, error_code::MISMATCH) };
    Ok(Response::bare(response_code::CZ, code))
}

/// `CY` — verify a supplied CVV for (`pan`, `expiry`, `service_code`)
/// under `cvk`.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn handle_cy(
    cfg: &HsmConfig,
    cvk_field: &[u8],
    supplied_cvv: &[u8],
    pan: &[u8],
    expiry: &[u8],
    service_code: &[u8],
) -> Response {
    fold_crypto_result(response_code::CZ, cfg, try_handle_cy(cfg, cvk_field, supplied_cvv, pan, expiry, service_code))
}
