//! Webhook body decoding.
//!
//! Decoding is a two-stage dispatch: each array element is first read into a
//! [`RawEvent`] carrying the common fields and the optional payload siblings
//! as untyped JSON, then the `type` discriminant selects the concrete
//! [`EventPayload`]. Message events dispatch a second time on `message.type`.

use linebot_core::{
    Beacon, Event, EventPayload, EventSource, EventType, LineBotError, Message, MessageType,
    Postback, Result, SourceType,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level webhook body.
#[derive(Deserialize)]
struct RawBody {
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    timestamp: i64,
    source: RawSource,
    reply_token: Option<String>,
    message: Option<Value>,
    postback: Option<Value>,
    beacon: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSource {
    #[serde(rename = "type")]
    source_type: String,
    user_id: Option<String>,
    group_id: Option<String>,
    room_id: Option<String>,
}

#[derive(Deserialize)]
struct MessageTag {
    #[serde(rename = "type")]
    message_type: String,
}

#[derive(Serialize)]
struct EncodedBody<'a> {
    events: &'a [Event],
}

/// Decode a webhook body into events, preserving array order.
///
/// Any error aborts the whole batch.
pub fn decode_events(body: &[u8]) -> Result<Vec<Event>> {
    let raw: RawBody = serde_json::from_slice(body)?;
    raw.events.into_iter().map(decode_event).collect()
}

/// Encode events as a webhook body that [`decode_events`] reads back unchanged.
pub fn encode_events(events: &[Event]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&EncodedBody { events })
}

fn decode_event(raw: RawEvent) -> Result<Event> {
    let event_type: EventType = raw.event_type.parse()?;
    let source = decode_source(raw.source)?;

    let payload = match event_type {
        EventType::Message => {
            let message = raw.message.ok_or_else(|| LineBotError::missing_payload(event_type))?;
            EventPayload::Message(decode_message(message)?)
        }
        EventType::Postback => {
            let postback = raw.postback.ok_or_else(|| LineBotError::missing_payload(event_type))?;
            EventPayload::Postback(Postback::deserialize(postback)?)
        }
        EventType::Beacon => {
            let beacon = raw.beacon.ok_or_else(|| LineBotError::missing_payload(event_type))?;
            EventPayload::Beacon(Beacon::deserialize(beacon)?)
        }
        EventType::Follow => EventPayload::Follow,
        EventType::Unfollow => EventPayload::Unfollow,
        EventType::Join => EventPayload::Join,
        EventType::Leave => EventPayload::Leave,
    };

    Ok(Event {
        reply_token: raw.reply_token.unwrap_or_default(),
        timestamp: raw.timestamp,
        source,
        payload,
    })
}

fn decode_source(raw: RawSource) -> Result<EventSource> {
    let source_type: SourceType = raw.source_type.parse()?;
    let missing = || LineBotError::missing_source_id(source_type);
    Ok(match source_type {
        SourceType::User => EventSource::User {
            user_id: raw.user_id.ok_or_else(missing)?,
        },
        SourceType::Group => EventSource::Group {
            group_id: raw.group_id.ok_or_else(missing)?,
            user_id: raw.user_id,
        },
        SourceType::Room => EventSource::Room {
            room_id: raw.room_id.ok_or_else(missing)?,
            user_id: raw.user_id,
        },
    })
}

fn decode_message(value: Value) -> Result<Message> {
    let tag = MessageTag::deserialize(&value)?;
    let message_type: MessageType = tag.message_type.parse()?;
    Ok(match message_type {
        MessageType::Text => Message::Text(Deserialize::deserialize(value)?),
        MessageType::Image => Message::Image(Deserialize::deserialize(value)?),
        MessageType::Video => Message::Video(Deserialize::deserialize(value)?),
        MessageType::Audio => Message::Audio(Deserialize::deserialize(value)?),
        MessageType::File => Message::File(Deserialize::deserialize(value)?),
        MessageType::Location => Message::Location(Deserialize::deserialize(value)?),
        MessageType::Sticker => Message::Sticker(Deserialize::deserialize(value)?),
    })
}
