//! The per-connection session loop (C6): one frame in, one frame out,
//! closing on any frame/grammar failure.

use hsm_core::HsmConfig;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Large enough for the biggest legal frame (§4.1: a 16-bit length field
/// caps a frame at 65535 + 2 bytes) so a single `read` call always
/// captures one whole frame without a resize.
const READ_BUFFER_SIZE: usize = 65_537;

/// Drive one accepted connection until the peer closes it or sends a
/// frame that fails to parse.
///
/// Per §4.5.1, one kernel-level `read` is treated as one frame boundary:
/// there is no loop collecting partial reads into a larger buffer, which
/// mirrors the real device's behaviour and keeps the session loop free of
/// any buffering state beyond the immutable `cfg`.
///
/// Generic over the stream type so tests can drive the loop over an
/// in-process [`tokio::io::DuplexStream`] instead of a real socket; the
/// production caller always passes a [`TcpStream`].
///
/// # Errors
///
/// Propagates the underlying socket's I/O errors; a parse failure is not
/// an `Err` here; it is handled by closing the connection, matching §7's
/// "no response, just close" rule for frame/grammar failures.
pub async fn handle_connection<S>(mut stream: S, cfg: &HsmConfig) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // peer closed the socket
        }

        let Some(response) = hsm_core::handle_frame(cfg, &buf[..n]) else {
            tracing::warn!(bytes = n, "frame failed to parse; closing connection");
            return Ok(());
        };

        stream.write_all(&response).await?;
    }
}
