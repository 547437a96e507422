//! `CA` — translate an ISO-0 PIN block from one terminal key to another.
//!
//! The real device supports independent source/destination PIN block
//! formats; this simulator's scope (§1 non-goals: no production key
//! handling) treats both ends as ISO-0 and does not XOR the account
//! number into the rebuilt block, mirroring `hsm_crypto::pin`'s documented
//! simplification on the decode side.

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::pinblock;
use crate::response::{error_code, response_code, Response};

use super::validate::{fold_crypto_result, parity_ok, select_error};

fn try_handle(
    cfg: &HsmConfig,
    tpk_field: &[u8],
    dest_key_field: &[u8],
    src_pin_block_field: &[u8],
) -> Result<Response, CryptoError> {
    let clear_tpk = envelope::decrypt_envelope_under_lmk(tpk_field, &cfg.lmk)?;
    if !parity_ok(cfg, &clear_tpk) {
        return Ok(Response::bare(response_code::CB, select_error(true, cfg, error_code::TERMINAL_KEY_PARITY)));
    }
    let clear_dest_key = envelope::decrypt_envelope_under_lmk(dest_key_field, &cfg.lmk)?;

    let src_ciphertext = pinblock::from_wire(src_pin_block_field)?;
    let clear_block = hsm_crypto::decrypt_ede3_ecb(&clear_tpk, &src_ciphertext)?;
    let pin_digits = hsm_crypto::extract_clear_pin(&clear_block)?;

    let dest_block = pinblock::build_iso0(&pin_digits)?;
    let dest_ciphertext = hsm_crypto::encrypt_ede3_ecb(&clear_dest_key, &dest_block)?;

    Ok(Response::bare(response_code::CB, error_code::SUCCESS).with_field("Dest PIN Block", pinblock::to_wire(&dest_ciphertext)))
}

/// `CA` — translate a PIN block from a source terminal key to a
/// destination key, preserving the clear PIN digits.
///
/// `_account` is part of the wire grammar (destination-format context a
/// real device would fold into the rebuilt block) but is unused by this
/// simulator's simplified ISO-0 rebuild; see the module docs.
#[must_use]
pub fn handle_ca(
    cfg: &HsmConfig,
    tpk_field: &[u8],
    dest_key_field: &[u8],
    src_pin_block_field: &[u8],
    _account: &[u8],
) -> Response {
    fold_crypto_result(response_code::CB, cfg, try_handle(cfg, tpk_field, dest_key_field, src_pin_block_field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmk::Lmk;

    fn test_lmk() -> Lmk {
        Lmk::from_hex(crate::config::DEFAULT_LMK_HEX).unwrap()
    }

    fn envelope_field(clear: [u8; 16]) -> Vec<u8> {
        let ciphertext = envelope::encrypt_under_lmk(&test_lmk(), &clear);
        envelope::u_envelope(&ciphertext)
    }

    #[test]
    fn translates_pin_block_preserving_digits() {
        let cfg = HsmConfig::new(test_lmk(), Vec::new(), false, false);

        let mut clear_src_tpk = [0x11u8; 16];
        hsm_crypto::parity::modify_key_to_odd_parity(&mut clear_src_tpk);
        let clear_dest_key = [0x22u8; 16];

        let src_block = crate::pinblock::build_iso0("4321").unwrap();
        let src_ciphertext = hsm_crypto::encrypt_ede3_ecb(&clear_src_tpk, &src_block).unwrap();

        let resp = handle_ca(
            &cfg,
            &envelope_field(clear_src_tpk),
            &envelope_field(clear_dest_key),
            &crate::pinblock::to_wire(&src_ciphertext),
            b"123456789012",
        );

        assert_eq!(resp.code, response_code::CB);
        assert_eq!(resp.error, error_code::SUCCESS);

        let dest_field = resp.field("Dest PIN Block").unwrap();
        let dest_ciphertext = pinblock::from_wire(dest_field).unwrap();
        let dest_clear_block = hsm_crypto::decrypt_ede3_ecb(&clear_dest_key, &dest_ciphertext).unwrap();
        assert_eq!(hsm_crypto::extract_clear_pin(&dest_clear_block).unwrap(), "4321");
    }

    #[test]
    fn source_key_parity_failure_is_overridden_by_approve_all() {
        let cfg = HsmConfig::new(test_lmk(), Vec::new(), false, true);
        let broken_tpk = [0x00u8; 16];
        let clear_dest_key = [0x22u8; 16];
        let src_block = crate::pinblock::build_iso0("1111").unwrap();
        let src_ciphertext = hsm_crypto::encrypt_ede3_ecb(&broken_tpk, &src_block).unwrap();

        let resp = handle_ca(
            &cfg,
            &envelope_field(broken_tpk),
            &envelope_field(clear_dest_key),
            &crate::pinblock::to_wire(&src_ciphertext),
            b"123456789012",
        );
        assert_eq!(resp.error, error_code::SUCCESS);
    }
}
