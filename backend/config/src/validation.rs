//! Config validation with field paths and user-friendly messages.

use crate::schema::LineBotConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &LineBotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_channel(config, &mut report);
    validate_webhook(config, &mut report);
    validate_server(config, &mut report);
    report
}

fn validate_channel(config: &LineBotConfig, report: &mut ValidationReport) {
    if config.channel.channel_secret.trim().is_empty() {
        report.error("channel.channelSecret", "Channel secret is required");
    }
    if config.channel.channel_access_token.trim().is_empty() {
        report.error("channel.channelAccessToken", "Channel access token is required");
    }
}

fn validate_webhook(config: &LineBotConfig, report: &mut ValidationReport) {
    let webhook = &config.webhook;
    if !webhook.path.starts_with('/') {
        report.error(
            "webhook.path",
            format!("Webhook path '{}' must start with '/'", webhook.path),
        );
    }
    if webhook.max_body_bytes == 0 {
        report.error("webhook.maxBodyBytes", "maxBodyBytes must be > 0");
    }
}

fn validate_server(config: &LineBotConfig, report: &mut ValidationReport) {
    let port = config.server.port;
    if port < 1024 && port != 80 && port != 443 {
        report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        );
    }
}
