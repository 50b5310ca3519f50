//! WebSocket link to the game authority.
//!
//! This module provides:
//! - The transport abstraction with native and browser implementations
//! - Connection management with fixed-delay auto-reconnect
//! - The handle the UI uses for outbound actions
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────┐   frames   ┌─────────────────────┐
//!   │  Transport   │ ─────────▶ │  ConnectionManager  │
//!   │ (tungstenite │ ◀───────── │  (INIT, reconnect)  │
//!   │  / web-sys)  │   INIT,    └─────────────────────┘
//!   └──────────────┘   ANSWER,            │
//!          ▲           PASS               ▼
//!          │                   ┌─────────────────────┐
//!   ┌──────────────┐           │ ProtocolDispatcher  │
//!   │  GameHandle  │           │  + snapshot store   │
//!   │ (submit/pass)│           └─────────────────────┘
//!   └──────────────┘                      │
//!          ▲                              ▼
//!          │                      ┌──────────────┐
//!          └──────── user ─────── │   Renderer   │
//!                                 └──────────────┘
//! ```

pub mod connection;
pub mod manager;

pub use connection::{sleep, ConnectionState, Connector, GameHandle, ReconnectPolicy, Transport};
pub use manager::ConnectionManager;

#[cfg(not(target_arch = "wasm32"))]
pub use connection::TungsteniteConnector;
#[cfg(target_arch = "wasm32")]
pub use connection::WebSocketConnector;
