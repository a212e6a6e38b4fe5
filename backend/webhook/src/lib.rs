//! Inbound side of a LINE bot: webhook signature verification and typed
//! event decoding, with an optional axum endpoint on top.

pub mod decode;
pub mod parser;
pub mod router;
pub mod signature;

#[cfg(test)]
mod fixtures;

pub use decode::{decode_events, encode_events};
pub use parser::{Client, signature_header};
pub use router::{DEFAULT_MAX_BODY_BYTES, DEFAULT_WEBHOOK_PATH, EventHandler, LineWebhook};
pub use signature::{SIGNATURE_HEADER, sign, verify_signature};
