//! `FA` — re-wrap a Zone Master Key and its paired Zone PIN Key under the
//! Local Master Key.
//!
//! The ZPK arrives encrypted under the ZMK (the normal zone-key wrapping
//! relationship), not under the LMK; `FA`'s job is to move both into the
//! LMK domain. There is no parity-bearing field in this command's grammar
//! (§4.2), so it never produces a non-zero error code beyond a folded
//! crypto exception (§4.3: "always answers `00`").

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::envelope;
use crate::response::{error_code, response_code, Response};

use super::validate::fold_crypto_result;

fn try_handle(cfg: &HsmConfig, zmk_field: &[u8], zpk_field: &[u8]) -> Result<Response, CryptoError> {
    let clear_zmk = envelope::decrypt_envelope_under_lmk(zmk_field, &cfg.lmk)?;
    let zmk_under_lmk = envelope::encrypt_under_lmk(&cfg.lmk, &clear_zmk);

    let zpk_ciphertext = envelope::ciphertext_from_hex_field(zpk_field)?;
    let clear_zpk = hsm_crypto::decrypt_ede3_ecb(&clear_zmk, &zpk_ciphertext)?;
    let zpk_under_lmk = envelope::encrypt_under_lmk(&cfg.lmk, &clear_zpk);

    Ok(Response::bare(response_code::FB, error_code::SUCCESS)
        .with_field("ZMK under LMK", envelope::u_envelope(&zmk_under_lmk))
        .with_field("ZPK under LMK", envelope::u_envelope(&zpk_under_lmk)))
}

/// `FA` — re-wrap a ZMK (under the LMK) and its paired ZPK (under that
/// ZMK) into two `U`-tagged envelopes under the Local Master Key.
#[must_use]
pub fn handle_fa(cfg: &HsmConfig, zmk_field: &[u8], zpk_field: &[u8]) -> Response {
    fold_crypto_result(response_code::FB, cfg, try_handle(cfg, zmk_field, zpk_field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmk::Lmk;

    fn test_lmk() -> Lmk {
        Lmk::from_hex(crate::config::DEFAULT_LMK_HEX).unwrap()
    }

    #[test]
    fn rewraps_zmk_and_zpk_under_lmk() {
        let lmk = test_lmk();
        let cfg = HsmConfig::new(lmk.clone(), Vec::new(), false, false);

        let clear_zmk = [0x12u8; 16];
        let zmk_field = envelope::u_envelope(&envelope::encrypt_under_lmk(&lmk, &clear_zmk));

        let clear_zpk = [0x34u8; 16];
        let zpk_under_zmk = hsm_crypto::encrypt_ede3_ecb(&clear_zmk, &clear_zpk).unwrap();
        let zpk_field = envelope::u_envelope(&zpk_under_zmk);

        let resp = handle_fa(&cfg, &zmk_field, &zpk_field);
        assert_eq!(resp.code, response_code::FB);
        assert_eq!(resp.error, error_code::SUCCESS);

        let zmk_under_lmk = resp.field("ZMK under LMK").unwrap();
        let recovered_zmk = envelope::decrypt_envelope_under_lmk(zmk_under_lmk, &lmk).unwrap();
        assert_eq!(recovered_zmk, clear_zmk);

        let zpk_under_lmk = resp.field("ZPK under LMK").unwrap();
        let recovered_zpk = envelope::decrypt_envelope_under_lmk(zpk_under_lmk, &lmk).unwrap();
        assert_eq!(recovered_zpk, clear_zpk);
    }
}
