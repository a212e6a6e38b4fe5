//! Shared webhook fixture for tests.

use linebot_core::{
    Beacon, Event, EventPayload, EventSource, ImageMessage, LocationMessage, Message, Postback,
    StickerMessage, TextMessage,
};

pub const SECRET: &str = "testsecret";

pub const REQUEST_BODY: &str = r#"{
    "events": [
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "message",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "message": {
                "id": "325708",
                "type": "text",
                "text": "Hello, world"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "message",
            "timestamp": 1462629479859,
            "source": {
                "type": "group",
                "groupId": "u206d25c2ea6bd87c17655609a1c37cb8",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "message": {
                "id": "325708",
                "type": "text",
                "text": "Hello, world"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "message",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "message": {
                "id": "325708",
                "type": "image"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "message",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "message": {
                "id": "325708",
                "type": "location",
                "title": "hello",
                "address": "〒150-0002 東京都渋谷区渋谷２丁目２１−１",
                "latitude": 35.65910807942215,
                "longitude": 139.70372892916203
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "message",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "message": {
                "id": "325708",
                "type": "sticker",
                "packageId": "1",
                "stickerId": "1"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "follow",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            }
        },
        {
            "type": "unfollow",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "join",
            "timestamp": 1462629479859,
            "source": {
                "type": "group",
                "groupId": "cxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
            }
        },
        {
            "type": "leave",
            "timestamp": 1462629479859,
            "source": {
                "type": "group",
                "groupId": "cxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "postback",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "u206d25c2ea6bd87c17655609a1c37cb8"
            },
            "postback": {
                "data": "action=buyItem&itemId=123123&color=red",
                "params": {}
            }
        },
        {
            "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
            "type": "beacon",
            "timestamp": 1462629479859,
            "source": {
                "type": "user",
                "userId": "U012345678901234567890123456789ab"
            },
            "beacon": {
                "hwid":"374591320"
            }
        }
    ]
}
"#;

const REPLY_TOKEN: &str = "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA";
const TIMESTAMP: i64 = 1462629479859;
const USER_ID: &str = "u206d25c2ea6bd87c17655609a1c37cb8";
const GROUP_ID: &str = "cxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

fn user() -> EventSource {
    EventSource::User {
        user_id: USER_ID.into(),
    }
}

fn event(reply_token: &str, source: EventSource, payload: EventPayload) -> Event {
    Event {
        reply_token: reply_token.into(),
        timestamp: TIMESTAMP,
        source,
        payload,
    }
}

fn hello() -> Message {
    Message::Text(TextMessage {
        id: "325708".into(),
        text: "Hello, world".into(),
    })
}

/// The decoded form of [`REQUEST_BODY`], in order.
pub fn expected_events() -> Vec<Event> {
    vec![
        event(REPLY_TOKEN, user(), EventPayload::Message(hello())),
        event(
            REPLY_TOKEN,
            EventSource::Group {
                group_id: USER_ID.into(),
                user_id: Some(USER_ID.into()),
            },
            EventPayload::Message(hello()),
        ),
        event(
            REPLY_TOKEN,
            user(),
            EventPayload::Message(Message::Image(ImageMessage {
                id: "325708".into(),
            })),
        ),
        event(
            REPLY_TOKEN,
            user(),
            EventPayload::Message(Message::Location(LocationMessage {
                id: "325708".into(),
                title: "hello".into(),
                address: "〒150-0002 東京都渋谷区渋谷２丁目２１−１".into(),
                latitude: 35.65910807942215,
                longitude: 139.70372892916203,
            })),
        ),
        event(
            REPLY_TOKEN,
            user(),
            EventPayload::Message(Message::Sticker(StickerMessage {
                id: "325708".into(),
                package_id: "1".into(),
                sticker_id: "1".into(),
            })),
        ),
        event(REPLY_TOKEN, user(), EventPayload::Follow),
        event("", user(), EventPayload::Unfollow),
        event(
            REPLY_TOKEN,
            EventSource::Group {
                group_id: GROUP_ID.into(),
                user_id: None,
            },
            EventPayload::Join,
        ),
        event(
            "",
            EventSource::Group {
                group_id: GROUP_ID.into(),
                user_id: None,
            },
            EventPayload::Leave,
        ),
        event(
            REPLY_TOKEN,
            user(),
            EventPayload::Postback(Postback {
                data: "action=buyItem&itemId=123123&color=red".into(),
                params: Default::default(),
            }),
        ),
        event(
            REPLY_TOKEN,
            EventSource::User {
                user_id: "U012345678901234567890123456789ab".into(),
            },
            EventPayload::Beacon(Beacon {
                hwid: "374591320".into(),
                kind: None,
                dm: None,
            }),
        ),
    ]
}
