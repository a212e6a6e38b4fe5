use thiserror::Error;

use crate::event::{EventType, SourceType};

/// Top-level error type for webhook parsing.
#[derive(Debug, Error)]
pub enum LineBotError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("failed to read request body: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("unknown source type: {0}")]
    UnknownSourceType(String),

    #[error("{object} is missing required field `{field}`")]
    MissingField {
        object: &'static str,
        field: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LineBotError>;

impl LineBotError {
    /// HTTP status a webhook endpoint should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            LineBotError::Read(_) | LineBotError::Config(_) => 500,
            _ => 400,
        }
    }

    /// Short machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            LineBotError::InvalidSignature => "invalid_signature",
            LineBotError::Read(_) => "read_error",
            LineBotError::MalformedJson(_) => "malformed_json",
            LineBotError::UnknownEventType(_) => "unknown_event_type",
            LineBotError::UnknownMessageType(_) => "unknown_message_type",
            LineBotError::UnknownSourceType(_) => "unknown_source_type",
            LineBotError::MissingField { .. } => "missing_field",
            LineBotError::Config(_) => "config_error",
        }
    }

    pub fn missing_payload(event_type: EventType) -> Self {
        let field = match event_type {
            EventType::Message => "message",
            EventType::Postback => "postback",
            EventType::Beacon => "beacon",
            _ => "payload",
        };
        LineBotError::MissingField {
            object: event_type.object_name(),
            field,
        }
    }

    pub fn missing_source_id(source_type: SourceType) -> Self {
        let (object, field) = match source_type {
            SourceType::User => ("user source", "userId"),
            SourceType::Group => ("group source", "groupId"),
            SourceType::Room => ("room source", "roomId"),
        };
        LineBotError::MissingField { object, field }
    }
}
