//! Shared error types for the wire protocol, layout and transport.

use thiserror::Error;

use crate::models::Language;

/// Failure to order or place the letters of an alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The letter has no position in the language's alphabet.
    #[error("letter {letter:?} is not part of the {language} alphabet")]
    UnknownLetter { letter: String, language: Language },
    /// Nothing to lay out.
    #[error("cannot lay out an empty alphabet")]
    Empty,
}

/// An inbound message that must be dropped without touching state.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame or its payload did not match the expected shape.
    #[error("malformed {kind} message: {source}")]
    Decode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    /// A kind that requires a payload arrived without one.
    #[error("{kind} message is missing its payload")]
    MissingPayload { kind: String },
    /// The snapshot names a current letter it does not track.
    #[error("current letter {letter:?} is missing from lettersState")]
    UnknownCurrentLetter { letter: String },
    /// The first snapshot could not be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl ProtocolError {
    pub(crate) fn decode(kind: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            kind: kind.into(),
            source,
        }
    }
}

/// Transport-level failures. All of them end the current connection and
/// hand control to the reconnect policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("send failed: {0}")]
    Send(String),
    #[error("receive failed: {0}")]
    Receive(String),
    #[error("connection closed")]
    Closed,
}
