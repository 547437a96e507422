//! Process-lifetime configuration: the LMK and the immutable policy flags.

use crate::lmk::Lmk;

/// Default TCP port the simulator binds to when not overridden.
pub const DEFAULT_PORT: u16 = 1500;

/// Default LMK, as 32 hex characters, used when no `--lmk` is configured.
pub const DEFAULT_LMK_HEX: &str = "deafbeedeafbeedeafbeedeafbeedeaf";

/// Firmware version string reported by the `NC` diagnostics command.
pub const FIRMWARE_VERSION: &[u8] = b"0007-E000";

/// Immutable, process-wide HSM configuration.
///
/// Built once at startup (`HsmConfig::new`) and shared by reference (or an
/// `Arc` in the production binary) across every connection. Nothing in the
/// core ever mutates it.
#[derive(Clone)]
pub struct HsmConfig {
    /// The Local Master Key all working keys are encrypted under.
    pub lmk: Lmk,
    /// Fixed per-deployment header every frame must carry. Empty means no
    /// header is configured.
    pub header: Vec<u8>,
    /// When `true`, terminal-key and PVK parity checks are not performed
    /// (they never fail, so their error codes are never emitted).
    pub skip_parity: bool,
    /// When `true`, error codes `01` and `10` are overridden to `00` in
    /// the PIN-verification path. Never affects response codes, and never
    /// overrides `11`, `27`, or the CVV-verification path's `10`.
    pub approve_all: bool,
}

impl HsmConfig {
    /// Build a configuration from an already-parsed [`Lmk`].
    #[must_use]
    pub fn new(lmk: Lmk, header: Vec<u8>, skip_parity: bool, approve_all: bool) -> Self {
        Self { lmk, header, skip_parity, approve_all }
    }
}
