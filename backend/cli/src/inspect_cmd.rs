//! Offline tooling: sign a body, or verify and decode a captured one.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use linebot_core::LineBotError;
use linebot_webhook::{decode_events, sign as sign_body, verify_signature};

fn read_body(path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read body from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut buf))
            .with_context(|| format!("Failed to read body file: {}", path.display()))?;
    }
    Ok(buf)
}

pub fn sign(secret: &str, path: &Path) -> Result<String> {
    let body = read_body(path)?;
    Ok(sign_body(secret.as_bytes(), &body))
}

/// Events as pretty JSON in their canonical wire shape.
pub fn parse(secret: &str, signature: &str, path: &Path) -> Result<String> {
    let body = read_body(path)?;
    if !verify_signature(secret.as_bytes(), &body, Some(signature)) {
        bail!(LineBotError::InvalidSignature);
    }
    let events = decode_events(&body)?;
    Ok(serde_json::to_string_pretty(&events)?)
}
