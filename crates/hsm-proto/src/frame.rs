//! Frame codec: `[len:u16 BE][header?][cmd:2][payload]`.
//!
//! A `Frame` is a pure data holder (command code + payload slice). Parsing
//! never copies the payload: [`parse`] returns a borrow into the caller's
//! buffer, so a connection that reads one TCP segment per frame (§4.5 of
//! the design) pays no extra allocation on the hot path.

use bytes::BufMut;

use crate::errors::ProtocolError;

/// Two-letter ASCII command or response code.
pub type CodeBytes = [u8; 2];

/// A parsed, unframed request: its 2-letter command code and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// The 2-letter ASCII command code (e.g. `b"NC"`).
    pub command: CodeBytes,
    /// Payload bytes following the command code.
    pub payload: &'a [u8],
}

/// Parse a raw frame: `[len:u16 BE][header][cmd:2][payload]`.
///
/// `len` must equal `bytes.len() - 2` and `header` must byte-compare equal
/// to `expected_header` (an empty `expected_header` means no header is
/// configured).
///
/// # Errors
///
/// - [`ProtocolError::ShortFrame`] if `bytes` is too short to contain the
///   length prefix, the header, or the 2-byte command code.
/// - [`ProtocolError::MalformedFrame`] if the declared length does not
///   match the actual body length.
/// - [`ProtocolError::BadHeader`] if the header bytes do not match.
pub fn parse<'a>(bytes: &'a [u8], expected_header: &[u8]) -> Result<Frame<'a>, ProtocolError> {
    if bytes.len() < 2 {
        return Err(ProtocolError::ShortFrame { expected: 2, actual: bytes.len() });
    }

    let declared_len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let body = &bytes[2..];
    if declared_len != body.len() {
        return Err(ProtocolError::MalformedFrame { declared: declared_len, actual: body.len() });
    }

    if body.len() < expected_header.len() {
        return Err(ProtocolError::ShortFrame { expected: expected_header.len(), actual: body.len() });
    }
    let (header, rest) = body.split_at(expected_header.len());
    if header != expected_header {
        return Err(ProtocolError::BadHeader);
    }

    if rest.len() < 2 {
        return Err(ProtocolError::ShortFrame { expected: 2, actual: rest.len() });
    }
    let (command, payload) = rest.split_at(2);

    Ok(Frame { command: [command[0], command[1]], payload })
}

/// Build a response frame: `[len][header][resp_code][error_code][fields...]`.
///
/// `fields` are concatenated in order with no internal separators; the
/// per-command grammar makes each field self-delimiting on the wire. The
/// 2-byte length prefix covers `header.len() + body.len()` and does not
/// count itself.
#[must_use]
pub fn build(
    header: &[u8],
    response_code: CodeBytes,
    error_code: CodeBytes,
    fields: &[&[u8]],
) -> Vec<u8> {
    let body_len: usize = 2 + 2 + fields.iter().map(|f| f.len()).sum::<usize>();
    let total_len = header.len() + body_len;

    let mut out = Vec::with_capacity(2 + total_len);
    out.put_u16(total_len as u16);
    out.put_slice(header);
    out.put_slice(&response_code);
    out.put_slice(&error_code);
    for field in fields {
        out.put_slice(field);
    }
    out
}
