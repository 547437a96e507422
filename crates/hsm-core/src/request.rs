//! Command grammar (C4): per-command field parsing over a payload cursor.
//!
//! Each command is modelled as a variant of [`Request`] holding borrowed
//! slices into the caller's payload buffer — no field is copied during
//! parsing. This is the "tagged variant" shape recommended in the design's
//! §9 note, in place of the source's per-command class hierarchy.

use hsm_proto::{Cursor, ProtocolError};

/// The full sentinel set recognised by the envelope mechanism (§4.2.2).
const ALL_SCHEME_TAGS: &[u8] = b"UTSX";

/// A parsed request: the 2-letter command code plus its typed fields.
///
/// [`Request::Unknown`] is not a parse error — an unrecognised command
/// code still parses successfully and is answered with response code `ZZ`
/// (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// `NC` — diagnostics; no fields.
    Nc,
    /// `A0` — generate key.
    A0 {
        /// Generation mode.
        mode: u8,
        /// 3-byte key-type code.
        key_type: &'a [u8],
        /// Requested output key scheme.
        key_scheme: u8,
        /// ZMK/TMK envelope to also wrap the new key under, if supplied.
        zmk_tmk: Option<&'a [u8]>,
    },
    /// `BU` — key check value of a supplied key.
    Bu {
        /// 2-byte key-type code.
        key_type_code: &'a [u8],
        /// Length-flag byte (parser stores it verbatim; see §4.2).
        key_length_flag: u8,
        /// The key to check, if a `U`-tagged envelope was supplied.
        key: Option<&'a [u8]>,
    },
    /// `CA` — PIN block translation.
    Ca {
        /// Source terminal PIN key envelope.
        tpk: &'a [u8],
        /// Destination key envelope.
        dest_key: &'a [u8],
        /// Maximum PIN length the destination format allows.
        max_pin_len: &'a [u8],
        /// Source-encrypted PIN block.
        src_pin_block: &'a [u8],
        /// Source PIN block format.
        src_fmt: &'a [u8],
        /// Destination PIN block format.
        dst_fmt: &'a [u8],
        /// Account number (PAN) used to build the destination block.
        account: &'a [u8],
    },
    /// `CW` — generate CVV.
    Cw {
        /// Card Verification Key envelope.
        cvk: &'a [u8],
        /// Primary account number.
        pan: &'a [u8],
        /// Expiry date.
        expiry: &'a [u8],
        /// Service code.
        service_code: &'a [u8],
    },
    /// `CY` — verify CVV.
    Cy {
        /// Card Verification Key envelope.
        cvk: &'a [u8],
        /// Supplied CVV to verify.
        cvv: &'a [u8],
        /// Primary account number.
        pan: &'a [u8],
        /// Expiry date.
        expiry: &'a [u8],
        /// Service code.
        service_code: &'a [u8],
    },
    /// `DC` — verify PIN under a TPK.
    Dc {
        /// Terminal PIN key envelope.
        tpk: &'a [u8],
        /// PVK pair.
        pvk_pair: &'a [u8],
        /// Encrypted ISO-0 PIN block.
        pin_block: &'a [u8],
        /// PIN block format.
        fmt: &'a [u8],
        /// Account number.
        account: &'a [u8],
        /// PVK indicator.
        pvki: u8,
        /// Supplied PVV to verify.
        pvv: &'a [u8],
    },
    /// `EC` — verify PIN under a ZPK.
    Ec {
        /// Zone PIN key envelope.
        zpk: &'a [u8],
        /// PVK pair.
        pvk_pair: &'a [u8],
        /// Encrypted ISO-0 PIN block.
        pin_block: &'a [u8],
        /// PIN block format.
        fmt: &'a [u8],
        /// Account number, or token when `fmt == "04"`.
        account_or_token: &'a [u8],
        /// PVK indicator.
        pvki: u8,
        /// Supplied PVV to verify.
        pvv: &'a [u8],
    },
    /// `FA` — translate a ZMK/ZPK pair's key scheme.
    Fa {
        /// Zone Master Key envelope.
        zmk: &'a [u8],
        /// Zone PIN Key envelope.
        zpk: &'a [u8],
    },
    /// `HC` — diagnostic key check.
    Hc {
        /// The key to check.
        current_key: &'a [u8],
        /// Requested TMK scheme, echoed back unchanged.
        tmk_scheme: u8,
        /// Requested LMK scheme, echoed back unchanged.
        lmk_scheme: u8,
    },
    /// Any command code not in the table above.
    Unknown,
}

fn envelope<'a>(cursor: &mut Cursor<'a>, sentinels: &[u8], field: &'static str) -> Result<&'a [u8], ProtocolError> {
    cursor.take_envelope(sentinels, 33, 32, field)
}

fn parse_a0<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let mode = cursor.take_byte("Mode")?;
    let key_type = cursor.take(3, "KeyType")?;
    let key_scheme = cursor.take_byte("KeyScheme")?;

    let zmk_tmk = if mode == b'1' && cursor.peek() == Some(b';') {
        cursor.take_byte("delimiter")?;
        cursor.take_byte("ZMK/TMK Flag")?;
        if cursor.peek() == Some(b'U') { Some(cursor.take(33, "ZMK/TMK")?) } else { None }
    } else {
        None
    };

    Ok(Request::A0 { mode, key_type, key_scheme, zmk_tmk })
}

fn parse_bu<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let key_type_code = cursor.take(2, "KeyTypeCode")?;
    let key_length_flag = cursor.take_byte("KeyLengthFlag")?;
    let key = if cursor.peek() == Some(b'U') { Some(cursor.take(33, "Key")?) } else { None };
    Ok(Request::Bu { key_type_code, key_length_flag, key })
}

fn parse_ca<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let tpk = envelope(cursor, ALL_SCHEME_TAGS, "TPK")?;
    let dest_key = envelope(cursor, ALL_SCHEME_TAGS, "DestKey")?;
    let max_pin_len = cursor.take(2, "MaxPINLen")?;
    let src_pin_block = cursor.take(16, "SrcPINBlock")?;
    let src_fmt = cursor.take(2, "SrcFmt")?;
    let dst_fmt = cursor.take(2, "DstFmt")?;
    let account = cursor.take(12, "Account")?;
    Ok(Request::Ca { tpk, dest_key, max_pin_len, src_pin_block, src_fmt, dst_fmt, account })
}

fn parse_cw<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let cvk = envelope(cursor, ALL_SCHEME_TAGS, "CVK")?;
    let pan = cursor.take_until(b';')?;
    let expiry = cursor.take(4, "Expiry")?;
    let service_code = cursor.take(3, "ServiceCode")?;
    Ok(Request::Cw { cvk, pan, expiry, service_code })
}

fn parse_cy<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let cvk = envelope(cursor, ALL_SCHEME_TAGS, "CVK")?;
    let cvv = cursor.take(3, "CVV")?;
    let pan = cursor.take_until(b';')?;
    let expiry = cursor.take(4, "Expiry")?;
    let service_code = cursor.take(3, "ServiceCode")?;
    Ok(Request::Cy { cvk, cvv, pan, expiry, service_code })
}

fn parse_dc<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let tpk = envelope(cursor, ALL_SCHEME_TAGS, "TPK")?;
    let pvk_pair = cursor.take_envelope(b"U", 33, 32, "PVKPair")?;
    let pin_block = cursor.take(16, "PINBlock")?;
    let fmt = cursor.take(2, "Fmt")?;
    let account = cursor.take(12, "Account")?;
    let pvki = cursor.take_byte("PVKI")?;
    let pvv = cursor.take(4, "PVV")?;
    Ok(Request::Dc { tpk, pvk_pair, pin_block, fmt, account, pvki, pvv })
}

fn parse_ec<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let zpk = cursor.take_envelope(b"U", 33, 32, "ZPK")?;
    let pvk_pair = cursor.take_envelope(b"U", 33, 32, "PVKPair")?;
    let pin_block = cursor.take(16, "PINBlock")?;
    let fmt = cursor.take(2, "Fmt")?;
    let account_or_token = if fmt == b"04" { cursor.take(18, "Token")? } else { cursor.take(12, "Account")? };
    let pvki = cursor.take_byte("PVKI")?;
    let pvv = cursor.take(4, "PVV")?;
    Ok(Request::Ec { zpk, pvk_pair, pin_block, fmt, account_or_token, pvki, pvv })
}

fn parse_fa<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let zmk = envelope(cursor, b"UT", "ZMK")?;
    let zpk = envelope(cursor, b"UTX", "ZPK")?;
    Ok(Request::Fa { zmk, zpk })
}

fn parse_hc<'a>(cursor: &mut Cursor<'a>) -> Result<Request<'a>, ProtocolError> {
    let current_key = cursor.take_envelope(b"U", 33, 16, "CurrentKey")?;
    let delimiter = cursor.take_byte("delimiter")?;
    if delimiter != b';' {
        return Err(ProtocolError::MalformedCommand { delimiter: b';' });
    }
    let tmk_scheme = cursor.take_byte("KeyScheme(TMK)")?;
    let lmk_scheme = cursor.take_byte("KeyScheme(LMK)")?;
    Ok(Request::Hc { current_key, tmk_scheme, lmk_scheme })
}

/// Parse `payload` according to the grammar for `command` (§4.2).
///
/// Returns `Ok(Request::Unknown)` for a command code not in the table —
/// that is a valid, well-formed request answered with response code `ZZ`,
/// not a grammar failure. Trailing unread bytes are ignored silently,
/// mirroring observed device tolerance.
///
/// # Errors
///
/// A [`ProtocolError`] for any recognised command whose fields cannot be
/// parsed out of `payload` (missing delimiter, short envelope, etc.); this
/// is fatal to the connection (§7).
pub fn parse_request<'a>(command: [u8; 2], payload: &'a [u8]) -> Result<Request<'a>, ProtocolError> {
    let mut cursor = Cursor::new(payload);
    match &command {
        b"NC" => Ok(Request::Nc),
        b"A0" => parse_a0(&mut cursor),
        b"BU" => parse_bu(&mut cursor),
        b"CA" => parse_ca(&mut cursor),
        b"CW" => parse_cw(&mut cursor),
        b"CY" => parse_cy(&mut cursor),
        b"DC" => parse_dc(&mut cursor),
        b"EC" => parse_ec(&mut cursor),
        b"FA" => parse_fa(&mut cursor),
        b"HC" => parse_hc(&mut cursor),
        _ => Ok(Request::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nc_ignores_payload() {
        let req = parse_request(*b"NC", b"\x00\x00").unwrap();
        assert_eq!(req, Request::Nc);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let req = parse_request(*b"ZX", b"").unwrap();
        assert_eq!(req, Request::Unknown);
    }

    #[test]
    fn bu_parses_u_tagged_key() {
        let payload = b"021UA97831862E31CCC36E854FE184EE6453";
        let req = parse_request(*b"BU", payload).unwrap();
        match req {
            Request::Bu { key_type_code, key_length_flag, key } => {
                assert_eq!(key_type_code, b"02");
                assert_eq!(key_length_flag, b'1');
                assert_eq!(key.unwrap().len(), 33);
            },
            _ => panic!("expected Bu"),
        }
    }

    #[test]
    fn bu_without_u_tag_has_no_key_field() {
        let req = parse_request(*b"BU", b"021X").unwrap();
        match req {
            Request::Bu { key, .. } => assert!(key.is_none()),
            _ => panic!("expected Bu"),
        }
    }

    #[test]
    fn a0_no_zmk_section_when_mode_is_not_one() {
        let req = parse_request(*b"A0", b"0002U").unwrap();
        match req {
            Request::A0 { mode, key_type, key_scheme, zmk_tmk } => {
                assert_eq!(mode, b'0');
                assert_eq!(key_type, b"002");
                assert_eq!(key_scheme, b'U');
                assert!(zmk_tmk.is_none());
            },
            _ => panic!("expected A0"),
        }
    }

    #[test]
    fn cw_without_delimiter_is_malformed() {
        let err = parse_request(*b"CW", b"U01234567890123456789012345678901234567890").unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedCommand { delimiter: b';' }));
    }

    #[test]
    fn hc_requires_delimiter_after_current_key() {
        let mut payload = vec![b'U'];
        payload.extend_from_slice(&[b'0'; 32]);
        payload.push(b'X'); // not the required ';'
        payload.push(b'1');
        payload.push(b'1');
        let err = parse_request(*b"HC", &payload).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedCommand { delimiter: b';' }));
    }

    #[test]
    fn ec_token_format_changes_field_width() {
        let mut payload = vec![b'U'];
        payload.extend_from_slice(&[b'0'; 32]); // ZPK envelope
        payload.extend_from_slice(&[b'1'; 32]); // plain PVK pair
        payload.extend_from_slice(&[b'2'; 16]); // PIN block
        payload.extend_from_slice(b"04"); // Fmt == token format
        payload.extend_from_slice(&[b'3'; 18]); // Token
        payload.push(b'1'); // PVKI
        payload.extend_from_slice(b"4321"); // PVV
        let req = parse_request(*b"EC", &payload).unwrap();
        match req {
            Request::Ec { account_or_token, fmt, .. } => {
                assert_eq!(fmt, b"04");
                assert_eq!(account_or_token.len(), 18);
            },
            _ => panic!("expected Ec"),
        }
    }

    #[test]
    fn dc_pvk_pair_starting_with_non_u_tag_is_plain_32_bytes() {
        let mut payload = vec![b'U'];
        payload.extend_from_slice(&[b'0'; 32]); // TPK envelope
        payload.push(b'T'); // PVK pair leads with a scheme tag that is NOT `U`
        payload.extend_from_slice(&[b'1'; 31]); // rest of the plain 32-byte PVK pair
        payload.extend_from_slice(&[b'2'; 16]); // PIN block
        payload.extend_from_slice(b"01"); // Fmt
        payload.extend_from_slice(&[b'3'; 12]); // Account
        payload.push(b'1'); // PVKI
        payload.extend_from_slice(b"4321"); // PVV
        let req = parse_request(*b"DC", &payload).unwrap();
        match req {
            Request::Dc { pvk_pair, account, .. } => {
                assert_eq!(pvk_pair.len(), 32);
                assert_eq!(account.len(), 12);
            },
            _ => panic!("expected Dc"),
        }
    }

    #[test]
    fn ec_zpk_and_pvk_pair_starting_with_non_u_tag_are_plain_32_bytes() {
        let mut payload = vec![b'S']; // ZPK leads with a scheme tag that is NOT `U`
        payload.extend_from_slice(&[b'0'; 31]); // rest of the plain 32-byte ZPK
        payload.push(b'X'); // PVK pair leads with a different non-`U` scheme tag
        payload.extend_from_slice(&[b'1'; 31]); // rest of the plain 32-byte PVK pair
        payload.extend_from_slice(&[b'2'; 16]); // PIN block
        payload.extend_from_slice(b"01"); // Fmt
        payload.extend_from_slice(&[b'3'; 12]); // Account
        payload.push(b'1'); // PVKI
        payload.extend_from_slice(b"4321"); // PVV
        let req = parse_request(*b"EC", &payload).unwrap();
        match req {
            Request::Ec { zpk, pvk_pair, account_or_token, .. } => {
                assert_eq!(zpk.len(), 32);
                assert_eq!(pvk_pair.len(), 32);
                assert_eq!(account_or_token.len(), 12);
            },
            _ => panic!("expected Ec"),
        }
    }
}
