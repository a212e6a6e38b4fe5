//! Webhook request parser.
//!
//! Reads the body exactly once, verifies the signature over those bytes and
//! decodes the same buffer. Holds no mutable state, so one [`Client`] can be
//! shared across threads and tasks.

use std::fmt;
use std::io::Read;

use axum::http::{HeaderMap, Request};
use linebot_core::{Event, LineBotError, Result};

use crate::decode::decode_events;
use crate::signature::{SIGNATURE_HEADER, sign, verify_signature};

/// Channel credentials plus the parsing entry points.
#[derive(Clone)]
pub struct Client {
    channel_secret: String,
    channel_token: String,
}

impl Client {
    /// Both credentials must be non-empty.
    pub fn new(channel_secret: impl Into<String>, channel_token: impl Into<String>) -> Result<Self> {
        let channel_secret = channel_secret.into();
        let channel_token = channel_token.into();
        if channel_secret.is_empty() {
            return Err(LineBotError::Config("channel secret must not be empty".into()));
        }
        if channel_token.is_empty() {
            return Err(LineBotError::Config("channel token must not be empty".into()));
        }
        Ok(Self {
            channel_secret,
            channel_token,
        })
    }

    /// Access token for outbound API calls. Not used for parsing.
    pub fn channel_token(&self) -> &str {
        &self.channel_token
    }

    /// Parse an inbound request whose body is a blocking byte stream.
    pub fn parse_request<B: Read>(&self, request: Request<B>) -> Result<Vec<Event>> {
        let (parts, body) = request.into_parts();
        self.parse_reader(signature_header(&parts.headers), body)
    }

    /// Read `body` to completion, then verify and decode it.
    pub fn parse_reader<R: Read>(&self, signature: Option<&str>, mut body: R) -> Result<Vec<Event>> {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        self.parse_body(signature, &buf)
    }

    /// Verify and decode a body that the caller already buffered.
    pub fn parse_body(&self, signature: Option<&str>, body: &[u8]) -> Result<Vec<Event>> {
        if !verify_signature(self.channel_secret.as_bytes(), body, signature) {
            return Err(LineBotError::InvalidSignature);
        }
        decode_events(body)
    }

    /// The signature the platform would send for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        sign(self.channel_secret.as_bytes(), body)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("channel_secret", &"***")
            .field("channel_token", &"***")
            .finish()
    }
}

/// The signature header value, if present and valid UTF-8.
pub fn signature_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok())
}
