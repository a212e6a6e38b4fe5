//! `linebot-config`: configuration for LINE bot services.
//!
//! Provides:
//! - Typed config schema (channel credentials, webhook, server, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Environment-only configuration when no file is present
//! - Validation with field paths
//! - Redaction for safe logging/display

pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw};
pub use redact::redact;
pub use schema::{ChannelConfig, LineBotConfig, LoggingConfig, ServerConfig, WebhookConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// A validated config plus the non-fatal findings from validation.
///
/// Loading happens before a subscriber exists, so warnings are handed back
/// for the caller to log.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: LineBotConfig,
    pub warnings: Vec<ConfigValidationError>,
    /// `false` when the config came from environment variables alone.
    pub from_file: bool,
}

/// Load a config file, substitute env vars and validate.
///
/// With no file on disk the config comes from environment variables alone.
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: Option<&Path>) -> Result<PreparedConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let raw = match path {
        Some(path) => load_raw(path).await?,
        None => None,
    };
    prepare(raw, &env)
}

/// Turn a raw config tree (or none) into a validated config.
///
/// Validation errors fail the load, each one named in the error message.
pub fn prepare(raw: Option<serde_json::Value>, env: &HashMap<String, String>) -> Result<PreparedConfig> {
    let from_file = raw.is_some();
    let config = match raw {
        Some(value) => {
            let value = resolve_env_vars_with(&value, env)
                .context("Failed to resolve env vars in config")?;
            serde_json::from_value(value).context("Failed to deserialize config")?
        }
        None => LineBotConfig::from_env_map(env),
    };

    let report = validate(&config);
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", messages.join("; "));
    }

    Ok(PreparedConfig {
        config,
        warnings: report.warnings,
        from_file,
    })
}
