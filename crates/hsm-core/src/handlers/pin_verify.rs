//! `DC`/`EC` — verify an ISO-0 PIN block against a PVV.
//!
//! The two commands share one state machine (§4.3: "DC and EC share the
//! handler"); they differ only in which terminal key (TPK vs ZPK) decrypts
//! the PIN block and in their response code.

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::pinblock;
use crate::response::{error_code, response_code, CodeBytes, Response};

use super::validate::{fold_crypto_result, parity_ok, select_error};

/// Expected length of a PVK pair once hex-decoded: two 8-byte halves.
const CLEAR_PVK_LEN: usize = 16;

#[allow(clippy::too_many_arguments)]
fn try_handle(
    cfg: &HsmConfig,
    code: CodeBytes,
    terminal_key_field: &[u8],
    pvk_pair_field: &[u8],
    pin_block_field: &[u8],
    account_or_token: &[u8],
    pvki: u8,
    supplied_pvv: &[u8],
) -> Result<Response, CryptoError> {
    let clear_terminal_key = envelope::decrypt_envelope_under_lmk(terminal_key_field, &cfg.lmk)?;
    if !parity_ok(cfg, &clear_terminal_key) {
        return Ok(Response::bare(code, select_error(true, cfg, error_code::TERMINAL_KEY_PARITY)));
    }

    let clear_pvk = envelope::clear_pvk_pair(pvk_pair_field)?;
    if !parity_ok(cfg, &clear_pvk) {
        return Ok(Response::bare(code, select_error(true, cfg, error_code::PVK_PARITY)));
    }
    if clear_pvk.len() != CLEAR_PVK_LEN {
        return Ok(Response::bare(code, error_code::PVK_NOT_DOUBLE_LENGTH));
    }

    let pin_block_ciphertext = pinblock::from_wire(pin_block_field)?;
    let clear_pin_block = hsm_crypto::decrypt_ede3_ecb(&clear_terminal_key, &pin_block_ciphertext)?;
    let clear_pin = hsm_crypto::extract_clear_pin(&clear_pin_block)?;

    let expected_pvv = hsm_crypto::pvv::compute_pvv(account_or_token, pvki, &clear_pin, &clear_pvk)?;
    let result_code =
        if expected_pvv.as_bytes() == supplied_pvv { error_code::SUCCESS } else { select_error(true, cfg, error_code::MISMATCH) };
    Ok(Response::bare(code, result_code))
}

/// `DC` — verify a PIN under a Terminal PIN Key.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn handle_dc(
    cfg: &HsmConfig,
    tpk: &[u8],
    pvk_pair: &[u8],
    pin_block: &[u8],
    account: &[u8],
    pvki: u8,
    pvv: &[u8],
) -> Response {
    let result = try_handle(cfg, response_code::DD, tpk, pvk_pair, pin_block, account, pvki, pvv);
    fold_crypto_result(response_code::DD, cfg, result)
}

/// `EC` — verify a PIN under a Zone PIN Key.
///
/// When the request's `Fmt` field selects the token format (`04`),
/// `account_or_token` carries the token bytes in place of an account
/// number, and those bytes feed the PVV derivation directly in its
/// place — matching the simulator's documented scope (real per-format PIN
/// block translation is out of scope; see `CA`).
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn handle_ec(
    cfg: &HsmConfig,
    zpk: &[u8],
    pvk_pair: &[u8],
    pin_block: &[u8],
    account_or_token: &[u8],
    pvki: u8,
    pvv: &[u8],
) -> Response {
    let result = try_handle(cfg, response_code::ED, zpk, pvk_pair, pin_block, account_or_token, pvki, pvv);
    fold_crypto_result(response_code::ED, cfg, result)
}
