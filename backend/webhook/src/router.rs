//! axum integration: mounts a LINE webhook endpoint and hands verified
//! event batches to an [`EventHandler`].

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use linebot_core::{Event, LineBotError};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::parser::{Client, signature_header};

pub const DEFAULT_WEBHOOK_PATH: &str = "/webhooks/line";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Receives every accepted batch, in order.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, events: Vec<Event>) -> Result<()>;
}

#[async_trait]
impl EventHandler for mpsc::Sender<Event> {
    async fn handle(&self, events: Vec<Event>) -> Result<()> {
        for event in events {
            self.send(event)
                .await
                .map_err(|_| anyhow!("event receiver closed"))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Webhook endpoint
// ---------------------------------------------------------------------------

pub struct LineWebhook {
    client: Client,
    handler: Arc<dyn EventHandler>,
    path: String,
    max_body_bytes: usize,
}

#[derive(Clone)]
struct AppState {
    client: Client,
    handler: Arc<dyn EventHandler>,
}

impl LineWebhook {
    pub fn new(client: Client, handler: impl EventHandler + 'static) -> Self {
        Self {
            client,
            handler: Arc::new(handler),
            path: DEFAULT_WEBHOOK_PATH.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Requests with larger bodies are answered with 413 before parsing.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn build_router(&self) -> Router {
        let state = AppState {
            client: self.client.clone(),
            handler: self.handler.clone(),
        };
        Router::new()
            .route(&self.path, post(webhook_handler))
            .layer(DefaultBodyLimit::max(self.max_body_bytes))
            .with_state(state)
    }
}

async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("[LINE] Webhook body over limit, rejecting");
            return (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large").into_response();
        }
        Err(rejection) => {
            return reject(LineBotError::Read(std::io::Error::other(rejection.body_text())));
        }
    };

    let events = match state.client.parse_body(signature_header(&headers), &body) {
        Ok(events) => events,
        Err(err) => return reject(err),
    };

    let count = events.len();
    if let Err(err) = state.handler.handle(events).await {
        error!("[LINE] Event handler failed: {:#}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, "handler_failed").into_response();
    }

    info!(events = count, "[LINE] Webhook accepted");
    (StatusCode::OK, "ok").into_response()
}

fn reject(err: LineBotError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(kind = err.kind(), "[LINE] Webhook failed: {}", err);
    } else {
        warn!(kind = err.kind(), "[LINE] Rejecting webhook: {}", err);
    }
    (status, err.kind()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{REQUEST_BODY, SECRET, expected_events};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn client() -> Client {
        Client::new(SECRET, "testtoken").unwrap()
    }

    fn post_body(path: &str, signature: Option<&str>, body: &[u8]) -> Request<Body> {
        let mut builder = Request::post(path).header("content-type", "application/json");
        if let Some(sig) = signature {
            builder = builder.header("X-LINE-Signature", sig);
        }
        builder.body(Body::from(body.to_vec())).unwrap()
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _events: Vec<Event>) -> Result<()> {
            Err(anyhow!("downstream unavailable"))
        }
    }

    #[tokio::test]
    async fn delivers_events_in_order() {
        let (tx, mut rx) = mpsc::channel::<Event>(32);
        let app = LineWebhook::new(client(), tx).build_router();
        let body = REQUEST_BODY.as_bytes();
        let sig = client().sign(body);

        let resp = app
            .oneshot(post_body(DEFAULT_WEBHOOK_PATH, Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        assert_eq!(received, expected_events());
    }

    #[tokio::test]
    async fn invalid_signature_is_bad_request() {
        let (tx, mut rx) = mpsc::channel::<Event>(32);
        let app = LineWebhook::new(client(), tx).build_router();

        let resp = app
            .oneshot(post_body(
                DEFAULT_WEBHOOK_PATH,
                Some("invalidsignatue"),
                REQUEST_BODY.as_bytes(),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unknown_event_type_is_bad_request() {
        let (tx, _rx) = mpsc::channel::<Event>(32);
        let app = LineWebhook::new(client(), tx).build_router();
        let body = br#"{"events":[{"type":"quantum","timestamp":1,"source":{"type":"user","userId":"u"}}]}"#;
        let sig = client().sign(body);

        let resp = app
            .oneshot(post_body(DEFAULT_WEBHOOK_PATH, Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn custom_path() {
        let (tx, _rx) = mpsc::channel::<Event>(32);
        let webhook = LineWebhook::new(client(), tx).with_path("/callback");
        assert_eq!(webhook.path(), "/callback");
        let body = br#"{"events":[]}"#;
        let sig = client().sign(body);

        let resp = webhook
            .build_router()
            .oneshot(post_body("/callback", Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let (tx, _rx) = mpsc::channel::<Event>(32);
        let app = LineWebhook::new(client(), tx)
            .with_max_body_bytes(16)
            .build_router();
        let body = REQUEST_BODY.as_bytes();
        let sig = client().sign(body);

        let resp = app
            .oneshot(post_body(DEFAULT_WEBHOOK_PATH, Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn handler_failure_is_server_error() {
        let app = LineWebhook::new(client(), FailingHandler).build_router();
        let body = REQUEST_BODY.as_bytes();
        let sig = client().sign(body);

        let resp = app
            .oneshot(post_body(DEFAULT_WEBHOOK_PATH, Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn closed_receiver_is_server_error() {
        let (tx, rx) = mpsc::channel::<Event>(32);
        drop(rx);
        let app = LineWebhook::new(client(), tx).build_router();
        let body = REQUEST_BODY.as_bytes();
        let sig = client().sign(body);

        let resp = app
            .oneshot(post_body(DEFAULT_WEBHOOK_PATH, Some(&sig), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
