//! Webhook event model.
//!
//! Every inbound webhook body carries a batch of [`Event`]s. An event is a
//! closed set of kinds ([`EventType`]), each with a [`EventSource`] and at most
//! one kind-specific payload. Message events carry one of seven [`Message`]
//! variants. All values are plain owned data; they serialize back to the
//! platform's wire JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::LineBotError;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single webhook event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Token for replying to this event. Empty for `unfollow` and `leave`.
    pub reply_token: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub source: EventSource,
    pub payload: EventPayload,
}

/// Kind-specific part of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Message(Message),
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback(Postback),
    Beacon(Beacon),
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }

    pub fn message(&self) -> Option<&Message> {
        match &self.payload {
            EventPayload::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn postback(&self) -> Option<&Postback> {
        match &self.payload {
            EventPayload::Postback(p) => Some(p),
            _ => None,
        }
    }

    pub fn beacon(&self) -> Option<&Beacon> {
        match &self.payload {
            EventPayload::Beacon(b) => Some(b),
            _ => None,
        }
    }

    /// The event time, or `None` when the timestamp is outside chrono's range.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

impl EventPayload {
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::Message(_) => EventType::Message,
            EventPayload::Follow => EventType::Follow,
            EventPayload::Unfollow => EventType::Unfollow,
            EventPayload::Join => EventType::Join,
            EventPayload::Leave => EventType::Leave,
            EventPayload::Postback(_) => EventType::Postback,
            EventPayload::Beacon(_) => EventType::Beacon,
        }
    }
}

/// Wire shape of an event, used for serialization.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_token: Option<&'a str>,
    #[serde(rename = "type")]
    event_type: EventType,
    timestamp: i64,
    source: &'a EventSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postback: Option<&'a Postback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    beacon: Option<&'a Beacon>,
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEvent {
            reply_token: (!self.reply_token.is_empty()).then_some(self.reply_token.as_str()),
            event_type: self.event_type(),
            timestamp: self.timestamp,
            source: &self.source,
            message: self.message(),
            postback: self.postback(),
            beacon: self.beacon(),
        }
        .serialize(serializer)
    }
}

/// The closed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Message,
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    Beacon,
}

impl EventType {
    pub const ALL: [EventType; 7] = [
        EventType::Message,
        EventType::Follow,
        EventType::Unfollow,
        EventType::Join,
        EventType::Leave,
        EventType::Postback,
        EventType::Beacon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Message => "message",
            EventType::Follow => "follow",
            EventType::Unfollow => "unfollow",
            EventType::Join => "join",
            EventType::Leave => "leave",
            EventType::Postback => "postback",
            EventType::Beacon => "beacon",
        }
    }

    /// Whether the platform attaches a reply token to events of this kind.
    pub fn has_reply_token(&self) -> bool {
        !matches!(self, EventType::Unfollow | EventType::Leave)
    }

    pub(crate) fn object_name(&self) -> &'static str {
        match self {
            EventType::Message => "message event",
            EventType::Follow => "follow event",
            EventType::Unfollow => "unfollow event",
            EventType::Join => "join event",
            EventType::Leave => "leave event",
            EventType::Postback => "postback event",
            EventType::Beacon => "beacon event",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = LineBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LineBotError::UnknownEventType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where an event originated.
///
/// Group and room sources carry the acting user's ID only when the platform
/// identified one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventSource {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
        #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
}

impl EventSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            EventSource::User { .. } => SourceType::User,
            EventSource::Group { .. } => SourceType::Group,
            EventSource::Room { .. } => SourceType::Room,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            EventSource::User { user_id } => Some(user_id),
            EventSource::Group { user_id, .. } | EventSource::Room { user_id, .. } => {
                user_id.as_deref()
            }
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            EventSource::Group { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        match self {
            EventSource::Room { room_id, .. } => Some(room_id),
            _ => None,
        }
    }

    /// The identifier a reply or push should be addressed to.
    pub fn primary_id(&self) -> &str {
        match self {
            EventSource::User { user_id } => user_id,
            EventSource::Group { group_id, .. } => group_id,
            EventSource::Room { room_id, .. } => room_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    User,
    Group,
    Room,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::User => "user",
            SourceType::Group => "group",
            SourceType::Room => "room",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = LineBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(SourceType::User),
            "group" => Ok(SourceType::Group),
            "room" => Ok(SourceType::Room),
            other => Err(LineBotError::UnknownSourceType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Content of a `message` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text(TextMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    File(FileMessage),
    Location(LocationMessage),
    Sticker(StickerMessage),
}

impl Message {
    pub fn id(&self) -> &str {
        match self {
            Message::Text(m) => &m.id,
            Message::Image(m) => &m.id,
            Message::Video(m) => &m.id,
            Message::Audio(m) => &m.id,
            Message::File(m) => &m.id,
            Message::Location(m) => &m.id,
            Message::Sticker(m) => &m.id,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Text(_) => MessageType::Text,
            Message::Image(_) => MessageType::Image,
            Message::Video(_) => MessageType::Video,
            Message::Audio(_) => MessageType::Audio,
            Message::File(_) => MessageType::File,
            Message::Location(_) => MessageType::Location,
            Message::Sticker(_) => MessageType::Sticker,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMessage {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMessage {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoMessage {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioMessage {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileMessage {
    pub id: String,
    pub file_name: String,
    pub file_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationMessage {
    pub id: String,
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StickerMessage {
    pub id: String,
    pub package_id: String,
    pub sticker_id: String,
}

/// The closed set of message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Video,
    Audio,
    File,
    Location,
    Sticker,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::Video => "video",
            MessageType::Audio => "audio",
            MessageType::File => "file",
            MessageType::Location => "location",
            MessageType::Sticker => "sticker",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = LineBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "video" => Ok(MessageType::Video),
            "audio" => Ok(MessageType::Audio),
            "file" => Ok(MessageType::File),
            "location" => Ok(MessageType::Location),
            "sticker" => Ok(MessageType::Sticker),
            other => Err(LineBotError::UnknownMessageType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Postback / Beacon
// ---------------------------------------------------------------------------

/// Payload of a `postback` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    /// Opaque data set by the bot on the action that triggered this postback.
    #[serde(default)]
    pub data: String,
    /// Extra parameters, e.g. `date`, `time` or `datetime` from a picker action.
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub params: BTreeMap<String, Value>,
}

impl Postback {
    /// A string-valued parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Payload of a `beacon` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    /// Hardware ID of the beacon that was detected.
    #[serde(default)]
    pub hwid: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BeaconEventType>,
    /// Device message, hex-encoded on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    pub dm: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeaconEventType {
    Enter,
    Leave,
    Banner,
}

impl BeaconEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeaconEventType::Enter => "enter",
            BeaconEventType::Leave => "leave",
            BeaconEventType::Banner => "banner",
        }
    }
}

impl fmt::Display for BeaconEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `null` params decode the same as absent ones.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Value>, D::Error> {
    Ok(Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => serializer.serialize_str(&hex::encode(b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| hex::decode(&s).map_err(de::Error::custom)).transpose()
    }
}
