//! Command grammar and handler state machines for the HSM simulator.
//!
//! This crate is entirely sans-IO. [`handle_frame`] is the one entry point
//! a transport layer needs: it takes a raw inbound frame and the
//! process-wide [`HsmConfig`], and returns the raw outbound frame to write
//! back, or `None` if the frame failed to parse — by §4.5 of the design,
//! a frame or command-grammar failure closes the connection without a
//! reply, so there is nothing to send.
//!
//! ```text
//! raw bytes ─▶ hsm_proto::parse ─▶ request::parse_request ─▶ handlers::dispatch ─▶ hsm_proto::build ─▶ raw bytes
//! ```
//!
//! See `hsm-server` for the `tokio`-based accept loop and session task
//! built on top of this function.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod envelope;
pub mod handlers;
pub mod lmk;
pub mod pinblock;
pub mod request;
pub mod response;

pub use config::HsmConfig;
pub use handlers::dispatch;
pub use lmk::{Lmk, LmkError};
pub use request::{parse_request, Request};
pub use response::Response;

/// Handle one raw inbound frame, producing the raw outbound response
/// frame.
///
/// Returns `None` if the frame could not be unframed or its command's
/// grammar could not be parsed (§4.1/§4.2 failures are fatal to the
/// connection); a recognised-but-unsupported command code is not a
/// failure and still produces a `ZZ`/`00` response (§4.3).
#[must_use]
pub fn handle_frame(cfg: &HsmConfig, raw: &[u8]) -> Option<Vec<u8>> {
    let frame = hsm_proto::parse(raw, &cfg.header).ok()?;
    let request = request::parse_request(frame.command, frame.payload).ok()?;
    let response = handlers::dispatch(cfg, request);
    Some(hsm_proto::build(&cfg.header, response.code, response.error, &response.field_bytes()))
}
