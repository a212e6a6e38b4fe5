//! Log Redaction Layer
//!
//! Scrubs phone numbers, bearer tokens and webhook signatures from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());
static BEARER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static SIGNATURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(x-line-signature\s*[:=]\s*)[A-Za-z0-9+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = input.to_string();

    redacted = TELEPHONE_RE.replace_all(&redacted, "[REDACTED_PHONE]").to_string();
    redacted = BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string();
    redacted = SIGNATURE_RE.replace_all(&redacted, "${1}[REDACTED_SIGNATURE]").to_string();

    redacted
}
