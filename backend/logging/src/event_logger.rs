//! Webhook Event Logger
//!
//! One structured log line per received event. Reply tokens are never logged
//! and free text goes through [`redact_sensitive_data`] first.

use chrono::{DateTime, Utc};
use linebot_core::{Event, EventPayload, EventType, Message, SourceType};
use tracing::info;

use crate::redact::redact_sensitive_data;

const MAX_SUMMARY_CHARS: usize = 80;

#[derive(Debug)]
pub struct EventLogEntry {
    pub received_at: DateTime<Utc>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub event_type: EventType,
    pub source_type: SourceType,
    pub source_id: String,
    pub summary: String,
}

impl EventLogEntry {
    pub fn from_event(event: &Event) -> Self {
        Self {
            received_at: Utc::now(),
            occurred_at: event.timestamp_utc(),
            event_type: event.event_type(),
            source_type: event.source.source_type(),
            source_id: event.source.primary_id().to_string(),
            summary: summarize(&event.payload),
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a received webhook event to the tracing system.
    pub fn log_event(event: &Event) {
        let entry = EventLogEntry::from_event(event);
        info!(
            target: "line_events",
            event_type = %entry.event_type,
            source = %entry.source_type,
            source_id = %entry.source_id,
            received_at = %entry.received_at.to_rfc3339(),
            occurred_at = %entry.occurred_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            summary = %entry.summary,
            "Webhook event"
        );
    }
}

/// Only free text is redacted; the structured summaries carry ids and
/// coordinates that the phone pattern would mangle.
fn summarize(payload: &EventPayload) -> String {
    let summary = match payload {
        EventPayload::Message(message) => match message {
            Message::Text(m) => redact_sensitive_data(&m.text),
            Message::Location(m) => format!("location {} ({}, {})", m.title, m.latitude, m.longitude),
            Message::Sticker(m) => format!("sticker {}/{}", m.package_id, m.sticker_id),
            Message::File(m) => format!("file {} ({} bytes)", m.file_name, m.file_size),
            other => format!("{} {}", other.message_type(), other.id()),
        },
        EventPayload::Postback(p) => redact_sensitive_data(&p.data),
        EventPayload::Beacon(b) => match b.kind {
            Some(kind) => format!("beacon {} {}", b.hwid, kind),
            None => format!("beacon {}", b.hwid),
        },
        EventPayload::Follow
        | EventPayload::Unfollow
        | EventPayload::Join
        | EventPayload::Leave => String::new(),
    };
    truncate(&summary)
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_SUMMARY_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX_SUMMARY_CHARS).collect();
    out.push('…');
    out
}
