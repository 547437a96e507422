//! Response assembly: response code, error code, and ordered result fields.

/// Two-letter ASCII response code, e.g. `b"ND"`.
pub type CodeBytes = [u8; 2];

/// Error codes (§6): 2 ASCII digits, emitted in the error-code slot.
pub mod error_code {
    use super::CodeBytes;

    /// Success, or a semantic failure overridden by `approve_all`.
    pub const SUCCESS: CodeBytes = *b"00";
    /// PVV/CVV verification mismatch, or a folded handler crypto exception.
    pub const MISMATCH: CodeBytes = *b"01";
    /// Terminal-side key (TPK/ZPK/CVK) parity failure.
    pub const TERMINAL_KEY_PARITY: CodeBytes = *b"10";
    /// PVK pair parity failure.
    pub const PVK_PARITY: CodeBytes = *b"11";
    /// PVK pair was not double length.
    pub const PVK_NOT_DOUBLE_LENGTH: CodeBytes = *b"27";
}

/// Response codes (§4.2): fixed per request command, set before any error
/// branch is evaluated.
pub mod response_code {
    use super::CodeBytes;

    /// `NC` diagnostics.
    pub const ND: CodeBytes = *b"ND";
    /// `A0` generate key.
    pub const A1: CodeBytes = *b"A1";
    /// `BU` key check value.
    pub const BV: CodeBytes = *b"BV";
    /// `CA` PIN block translation.
    pub const CB: CodeBytes = *b"CB";
    /// `CW` generate CVV.
    pub const CX: CodeBytes = *b"CX";
    /// `CY` verify CVV.
    pub const CZ: CodeBytes = *b"CZ";
    /// `DC` verify PIN (TPK).
    pub const DD: CodeBytes = *b"DD";
    /// `EC` verify PIN (ZPK).
    pub const ED: CodeBytes = *b"ED";
    /// `FA` translate key scheme.
    pub const FB: CodeBytes = *b"FB";
    /// `HC` diagnostic key check.
    pub const HD: CodeBytes = *b"HD";
    /// Unrecognised command.
    pub const ZZ: CodeBytes = *b"ZZ";
}

/// A fully-assembled response: response code, error code, and the ordered
/// result fields a handler produced.
///
/// Field order is insertion order (§3 data model); lookup by name is
/// available via [`Response::field`] for tracing and tests, but the wire
/// encoding (`hsm_proto::build`) only ever looks at the byte values in
/// order.
pub struct Response {
    /// The 2-letter response code.
    pub code: CodeBytes,
    /// The 2-digit error code.
    pub error: CodeBytes,
    /// Result fields, named for tracing/testing, in wire order.
    pub fields: Vec<(&'static str, Vec<u8>)>,
}

impl Response {
    /// A bare response with no result fields (e.g. a verification outcome
    /// that only carries a response/error code).
    #[must_use]
    pub fn bare(code: CodeBytes, error: CodeBytes) -> Self {
        Self { code, error, fields: Vec::new() }
    }

    /// Append a named result field, preserving insertion order.
    #[must_use]
    pub fn with_field(mut self, name: &'static str, value: Vec<u8>) -> Self {
        self.fields.push((name, value));
        self
    }

    /// Look up a result field by name (trace/test use only).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[u8]> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_slice())
    }

    /// Byte slices of every field, in wire order, for [`hsm_proto::build`].
    #[must_use]
    pub fn field_bytes(&self) -> Vec<&[u8]> {
        self.fields.iter().map(|(_, v)| v.as_slice()).collect()
    }
}
