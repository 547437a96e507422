//! Wire framing for the HSM simulator's ASCII request/response protocol.
//!
//! ```text
//! [len:u16 BE][header?][cmd:2][payload]   (request)
//! [len:u16 BE][header?][resp:2][error:2][fields...]   (response)
//! ```
//!
//! This crate only concerns itself with framing and field-boundary
//! discovery (§4.1/§4.2 of the design): it has no notion of what a command
//! means. See `hsm-core` for the per-command grammar and handlers built on
//! top of [`cursor::Cursor`] and [`frame::parse`]/[`frame::build`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cursor;
pub mod errors;
pub mod frame;

pub use cursor::Cursor;
pub use errors::ProtocolError;
pub use frame::{build, parse, CodeBytes, Frame};
