//! Command dispatch (C5): route a parsed [`Request`](crate::request::Request)
//! to its handler and produce a [`Response`].
//!
//! Each submodule owns one command (or, for `DC`/`EC`, a shared pair that
//! differs only in which key field decrypts the PIN block). [`validate`]
//! holds the cross-cutting validation/error-selection helpers every
//! handler builds on, per the universal steps in §4.3 of the design.

pub mod ca;
pub mod cvv;
pub mod diagnostics;
pub mod key_translate;
pub mod keygen;
pub mod pin_verify;
pub mod validate;

use crate::config::HsmConfig;
use crate::request::Request;
use crate::response::{error_code, response_code, Response};

/// Dispatch a parsed request to its handler, producing a response.
///
/// [`Request::Unknown`] is answered with response code `ZZ` and error `00`
/// — an unrecognised command code is a well-formed request, not a parse
/// failure (§4.3).
#[must_use]
pub fn dispatch(cfg: &HsmConfig, request: Request<'_>) -> Response {
    match request {
        Request::Nc => diagnostics::handle_nc(cfg),

        Request::A0 { zmk_tmk, .. } => keygen::handle_a0(cfg, zmk_tmk),

        Request::Bu { key, .. } => {
            validate::fold_crypto_result(response_code::BV, cfg, diagnostics::try_handle_bu(cfg, key))
        },

        Request::Ca { tpk, dest_key, src_pin_block, account, .. } => {
            ca::handle_ca(cfg, tpk, dest_key, src_pin_block, account)
        },

        Request::Cw { cvk, pan, expiry, service_code } => cvv::handle_cw(cfg, cvk, pan, expiry, service_code),

        Request::Cy { cvk, cvv: supplied_cvv, pan, expiry, service_code } => {
            cvv::handle_cy(cfg, cvk, supplied_cvv, pan, expiry, service_code)
        },

        Request::Dc { tpk, pvk_pair, pin_block, account, pvki, pvv, .. } => {
            pin_verify::handle_dc(cfg, tpk, pvk_pair, pin_block, account, pvki, pvv)
        },

        Request::Ec { zpk, pvk_pair, pin_block, account_or_token, pvki, pvv, .. } => {
            pin_verify::handle_ec(cfg, zpk, pvk_pair, pin_block, account_or_token, pvki, pvv)
        },

        Request::Fa { zmk, zpk } => key_translate::handle_fa(cfg, zmk, zpk),

        Request::Hc { current_key, tmk_scheme, lmk_scheme } => validate::fold_crypto_result(
            response_code::HD,
            cfg,
            diagnostics::try_handle_hc(cfg, current_key, tmk_scheme, lmk_scheme),
        ),

        Request::Unknown => Response::bare(response_code::ZZ, error_code::SUCCESS),
    }
}
