//! Wire protocol between the client and the game authority.
//!
//! Every frame is a JSON text frame shaped as `{ "type": ..., "payload": ... }`.
//! `payload` is omitted for kinds that carry none (`PASS`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::models::{GameOverStats, GameSnapshot, Language};

/// Path of the WebSocket endpoint on the authority's origin.
pub const WS_PATH: &str = "/ws";

pub const TYPE_INIT: &str = "INIT";
pub const TYPE_ANSWER: &str = "ANSWER";
pub const TYPE_PASS: &str = "PASS";
pub const TYPE_QUESTION: &str = "QUESTION";
pub const TYPE_TIMER_SYNC: &str = "TIMER_SYNC";
pub const TYPE_FEEDBACK: &str = "FEEDBACK";
pub const TYPE_GAME_OVER: &str = "GAME_OVER";
pub const TYPE_ERROR: &str = "ERROR";

/// Messages sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// Handshake, sent once after every successful open.
    #[serde(rename_all = "camelCase")]
    Init {
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    Answer {
        answer: String,
    },
    Pass,
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::Init { .. } => TYPE_INIT,
            ClientMessage::Answer { .. } => TYPE_ANSWER,
            ClientMessage::Pass => TYPE_PASS,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of `TIMER_SYNC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSync {
    pub time_remaining: u32,
}

/// Payload of `FEEDBACK`. Every field is optional since the client never
/// acts on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub letter: Option<String>,
    pub status: Option<String>,
    pub correct: Option<bool>,
}

/// Messages sent by the authority.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Question(GameSnapshot),
    TimerSync(TimerSync),
    Feedback(Feedback),
    GameOver(GameOverStats),
    /// Any kind this client does not know. Carried so it can be logged.
    Unknown { kind: String, payload: Option<Value> },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl ServerMessage {
    /// Decode one text frame.
    ///
    /// Unknown kinds decode successfully into [`ServerMessage::Unknown`]; only
    /// malformed frames and malformed payloads of known kinds are errors.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope =
            serde_json::from_str(frame).map_err(|e| ProtocolError::decode("envelope", e))?;

        match envelope.kind.as_str() {
            TYPE_QUESTION => payload(&envelope).map(ServerMessage::Question),
            TYPE_TIMER_SYNC => payload(&envelope).map(ServerMessage::TimerSync),
            TYPE_GAME_OVER => payload(&envelope).map(ServerMessage::GameOver),
            TYPE_FEEDBACK => match envelope.payload {
                None | Some(Value::Null) => Ok(ServerMessage::Feedback(Feedback::default())),
                Some(value) => serde_json::from_value(value)
                    .map(ServerMessage::Feedback)
                    .map_err(|e| ProtocolError::decode(TYPE_FEEDBACK, e)),
            },
            _ => Ok(ServerMessage::Unknown {
                kind: envelope.kind,
                payload: envelope.payload,
            }),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ServerMessage::Question(_) => TYPE_QUESTION,
            ServerMessage::TimerSync(_) => TYPE_TIMER_SYNC,
            ServerMessage::Feedback(_) => TYPE_FEEDBACK,
            ServerMessage::GameOver(_) => TYPE_GAME_OVER,
            ServerMessage::Unknown { kind, .. } => kind,
        }
    }
}

fn payload<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> Result<T, ProtocolError> {
    match &envelope.payload {
        None | Some(Value::Null) => Err(ProtocolError::MissingPayload {
            kind: envelope.kind.clone(),
        }),
        Some(value) => {
            T::deserialize(value).map_err(|e| ProtocolError::decode(envelope.kind.clone(), e))
        }
    }
}
