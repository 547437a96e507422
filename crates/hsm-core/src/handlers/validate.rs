//! Shared validation helpers used across handlers (§4.3 universal steps).

use hsm_crypto::CryptoError;

use crate::config::HsmConfig;
use crate::response::{error_code, CodeBytes, Response};

/// `true` iff `key` passes the odd-parity check, or `skip_parity` makes
/// the check a no-op.
#[must_use]
pub fn parity_ok(cfg: &HsmConfig, key: &[u8]) -> bool {
    cfg.skip_parity || hsm_crypto::parity::check_key_parity(key)
}

/// Apply the `approve_all` override to `code`, if `overridable`.
///
/// Only codes `01` and `10` are ever overridable, and only in specific
/// paths (§7): callers decide `overridable` per call site rather than per
/// error code, since the same code (`10`) is overridden in PIN
/// verification but never in CVV verification.
#[must_use]
pub fn select_error(overridable: bool, cfg: &HsmConfig, code: CodeBytes) -> CodeBytes {
    if overridable && cfg.approve_all { error_code::SUCCESS } else { code }
}

/// Fold a handler's [`CryptoError`] outcome into a [`Response`].
///
/// Any cryptographic exception not already handled as a specific
/// validation branch becomes error `01` under rule 5 of §4.3, itself
/// overridable by `approve_all`. The response code is fixed regardless
/// (§4.3: "set before any error branch").
#[must_use]
pub fn fold_crypto_result(
    code: CodeBytes,
    cfg: &HsmConfig,
    result: Result<Response, CryptoError>,
) -> Response {
    result.unwrap_or_else(|_| Response::bare(code, select_error(true, cfg, error_code::MISMATCH)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmk::Lmk;

    fn cfg(skip_parity: bool, approve_all: bool) -> HsmConfig {
        HsmConfig::new(Lmk::from_hex(crate::config::DEFAULT_LMK_HEX).unwrap(), Vec::new(), skip_parity, approve_all)
    }

    #[test]
    fn select_error_overrides_only_when_flagged_and_approved() {
        let approving = cfg(false, true);
        let strict = cfg(false, false);
        assert_eq!(select_error(true, &approving, error_code::TERMINAL_KEY_PARITY), error_code::SUCCESS);
        assert_eq!(select_error(false, &approving, error_code::TERMINAL_KEY_PARITY), error_code::TERMINAL_KEY_PARITY);
        assert_eq!(select_error(true, &strict, error_code::TERMINAL_KEY_PARITY), error_code::TERMINAL_KEY_PARITY);
    }

    #[test]
    fn skip_parity_short_circuits_the_check() {
        let cfg = cfg(true, false);
        assert!(parity_ok(&cfg, &[0x00u8; 16])); // all-even-parity bytes, would normally fail
    }
}
