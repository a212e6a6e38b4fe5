pub mod error;
pub mod event;

pub use error::{LineBotError, Result};
pub use event::{
    AudioMessage, Beacon, BeaconEventType, Event, EventPayload, EventSource, EventType,
    FileMessage, ImageMessage, LocationMessage, Message, MessageType, Postback, SourceType,
    StickerMessage, TextMessage, VideoMessage,
};
