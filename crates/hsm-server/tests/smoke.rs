//! Real-socket smoke test: binds an actual TCP listener and drives a
//! handful of commands over a live socket, rather than an in-process
//! duplex stream (see `session::tests` in the library crate for the
//! duplex-stream coverage of the per-frame closure rules).

use hsm_core::config::DEFAULT_LMK_HEX;
use hsm_server::{Server, ServerRuntimeConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn build_request(cmd: [u8; 2], payload: &[u8]) -> Vec<u8> {
    let body_len = 2 + payload.len();
    let mut out = Vec::with_capacity(2 + body_len);
    out.extend_from_slice(&(body_len as u16).to_be_bytes());
    out.extend_from_slice(&cmd);
    out.extend_from_slice(payload);
    out
}

async fn bind_test_server(config: ServerRuntimeConfig) -> std::net::SocketAddr {
    let server = Server::bind(config).await.expect("bind should succeed on port 0");
    let addr = server.local_addr().expect("local_addr should succeed once bound");
    tokio::spawn(server.run());
    addr
}

#[tokio::test]
async fn nc_round_trips_over_a_real_tcp_socket() {
    let config = ServerRuntimeConfig { bind_address: "127.0.0.1:0".to_string(), ..Default::default() };
    let addr = bind_test_server(config).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect should succeed");
    stream.write_all(&build_request(*b"NC", b"")).await.unwrap();

    let mut response = vec![0u8; 256];
    let n = stream.read(&mut response).await.unwrap();
    let frame = hsm_proto::parse(&response[..n], b"").unwrap();
    assert_eq!(frame.command, *b"ND");
    assert_eq!(&frame.payload[..2], b"00");
}

#[tokio::test]
async fn malformed_frame_closes_the_real_socket_without_a_reply() {
    let config = ServerRuntimeConfig { bind_address: "127.0.0.1:0".to_string(), ..Default::default() };
    let addr = bind_test_server(config).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect should succeed");
    // declared length does not match the body that follows
    stream.write_all(&[0xFF, 0xFF, b'N', b'C']).await.unwrap();

    let mut response = vec![0u8; 256];
    let n = stream.read(&mut response).await.unwrap();
    assert_eq!(n, 0, "server must close the socket without sending a reply");
}

#[tokio::test]
async fn header_round_trips_when_configured() {
    let config = ServerRuntimeConfig {
        bind_address: "127.0.0.1:0".to_string(),
        lmk_hex: DEFAULT_LMK_HEX.to_string(),
        header: b"SSSS".to_vec(),
        skip_parity: false,
        approve_all: false,
    };
    let addr = bind_test_server(config).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect should succeed");
    let mut raw = build_request(*b"NC", b"");
    raw.splice(2..2, b"SSSS".iter().copied());
    // fix up the declared length to include the header
    let body_len = (raw.len() - 2) as u16;
    raw[0..2].copy_from_slice(&body_len.to_be_bytes());
    stream.write_all(&raw).await.unwrap();

    let mut response = vec![0u8; 256];
    let n = stream.read(&mut response).await.unwrap();
    let frame = hsm_proto::parse(&response[..n], b"SSSS").unwrap();
    assert_eq!(frame.command, *b"ND");
}

#[tokio::test]
async fn two_requests_on_one_connection_are_answered_in_order() {
    let config = ServerRuntimeConfig { bind_address: "127.0.0.1:0".to_string(), ..Default::default() };
    let addr = bind_test_server(config).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect should succeed");

    stream.write_all(&build_request(*b"NC", b"")).await.unwrap();
    let mut buf1 = vec![0u8; 256];
    let n1 = stream.read(&mut buf1).await.unwrap();
    let first = hsm_proto::parse(&buf1[..n1], b"").unwrap();
    assert_eq!(first.command, *b"ND");

    stream.write_all(&build_request(*b"ZX", b"")).await.unwrap();
    let mut buf2 = vec![0u8; 256];
    let n2 = stream.read(&mut buf2).await.unwrap();
    let second = hsm_proto::parse(&buf2[..n2], b"").unwrap();
    assert_eq!(second.command, *b"ZZ");
}
