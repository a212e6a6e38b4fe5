//! Structured logging for LINE bot services.
//!
//! Handles subscriber setup (console plus optional NDJSON file rotation),
//! log redaction, and one-line summaries of received webhook events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
