//! Config file location and loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "linebot.yaml";

/// Resolve the config directory.
/// Priority: `LINEBOT_CONFIG_DIR` env > `~/.linebot/` > `./.linebot`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINEBOT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".linebot"),
        None => PathBuf::from(".linebot"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the raw YAML document as a JSON value tree, before env substitution.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub async fn load_raw(path: &Path) -> Result<Option<serde_json::Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    Ok(Some(value))
}
