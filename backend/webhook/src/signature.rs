//! X-LINE-Signature verification.
//!
//! The platform signs every webhook body with HMAC-SHA256 keyed by the
//! channel secret and sends the base64-encoded digest in a header.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Canonical name of the signature header. Header lookups are case-insensitive.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Sign a body with the channel secret and return the base64-encoded digest.
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return String::new();
    };
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a presented signature against the body.
///
/// A missing, non-base64 or wrong-length signature is simply invalid.
pub fn verify_signature(secret: &[u8], body: &[u8], signature: Option<&str>) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    let Ok(presented) = STANDARD.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    // Constant-time; rejects lengths other than 32.
    mac.verify_slice(&presented).is_ok()
}
