//! Letterwheel client.
//!
//! Keeps a timed alphabet quiz in sync with the game authority: the
//! connection lifecycle, the inbound protocol state machine, the snapshot it
//! maintains, and a rendering capability the UI implements. The Dioxus UI
//! itself lives behind the `web`/`desktop` features.

pub mod logging;

pub mod config;
pub mod dispatcher;
pub mod render;
pub mod store;
pub mod ws;

#[cfg(not(target_arch = "wasm32"))]
pub mod storage;

#[cfg(feature = "ui")]
pub mod ui;

pub use config::{ClientConfig, SessionConfig};
pub use dispatcher::{Outcome, Phase, ProtocolDispatcher};
pub use render::{LetterNodeView, QuestionView, Renderer};
pub use store::{Alphabet, GameSnapshotStore, StoreEffect};
pub use ws::{ConnectionManager, ConnectionState, GameHandle, ReconnectPolicy};
