//! Typed configuration schema for a LINE bot service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use linebot_webhook::{DEFAULT_MAX_BODY_BYTES, DEFAULT_WEBHOOK_PATH};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBotConfig {
    /// Channel credentials from the LINE developers console
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Webhook endpoint settings
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LineBotConfig {
    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();
        let defaults = Self::default();
        Self {
            channel: ChannelConfig {
                channel_secret: get("LINE_CHANNEL_SECRET").unwrap_or_default(),
                channel_access_token: get("LINE_CHANNEL_ACCESS_TOKEN").unwrap_or_default(),
            },
            webhook: WebhookConfig {
                path: get("LINEBOT_WEBHOOK_PATH").unwrap_or(defaults.webhook.path),
                ..defaults.webhook
            },
            server: ServerConfig {
                bind: get("LINEBOT_BIND").unwrap_or(defaults.server.bind),
                port: get("LINEBOT_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            logging: LoggingConfig {
                level: get("RUST_LOG").unwrap_or(defaults.logging.level),
                dir: get("LINEBOT_LOG_DIR").map(PathBuf::from),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    #[serde(default)]
    pub channel_secret: String,
    #[serde(default)]
    pub channel_access_token: String,
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |s: &str| if s.is_empty() { "" } else { "***" };
        f.debug_struct("ChannelConfig")
            .field("channel_secret", &mask(&self.channel_secret))
            .field("channel_access_token", &mask(&self.channel_access_token))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    #[serde(default = "default_webhook_path")]
    pub path: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_webhook_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Directory for rolling NDJSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

fn default_webhook_path() -> String {
    DEFAULT_WEBHOOK_PATH.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}
