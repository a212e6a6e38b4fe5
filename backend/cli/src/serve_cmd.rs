//! `linebot serve`: config, logging, webhook endpoint, event log sink.

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use linebot_config::{config_dir, config_file_path, load_and_prepare, redact};
use linebot_core::Event;
use linebot_logging::{init_logger, EventLogger};
use linebot_webhook::{Client, LineWebhook};

const EVENT_QUEUE_CAPACITY: usize = 256;

pub async fn run(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| config_file_path(&config_dir()));
    let prepared = load_and_prepare(Some(path.as_path())).await?;
    let mut config = prepared.config;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logger(config.logging.dir.as_ref(), &config.logging.level);
    if prepared.from_file {
        info!(path = %path.display(), "Loaded config");
    } else {
        info!("No config file, using environment");
    }
    for warning in &prepared.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    debug!(config = %redact(&serde_json::to_value(&config)?), "Effective config");

    let client = Client::new(
        config.channel.channel_secret.clone(),
        config.channel.channel_access_token.clone(),
    )?;

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_QUEUE_CAPACITY);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            EventLogger::log_event(&event);
        }
    });

    let webhook = LineWebhook::new(client, tx)
        .with_path(config.webhook.path.clone())
        .with_max_body_bytes(config.webhook.max_body_bytes);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(webhook.build_router())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr = %addr, path = %webhook.path(), "LINE webhook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
