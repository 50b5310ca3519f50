//! Transport abstraction, reconnect policy and the outbound handle.
//!
//! This module provides the shared types and conditionally includes
//! the platform-specific transport.

use std::time::Duration;

use async_trait::async_trait;
use futures_channel::mpsc::UnboundedSender;
use letterwheel_shared::{ClientMessage, TransportError};

/// Connection state of the session's single WebSocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Fixed-delay reconnect policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay before every reconnect attempt, in milliseconds
    pub delay_ms: u32,
    /// Maximum consecutive failed attempts (0 = infinite)
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            max_attempts: 0,
        }
    }
}

impl ReconnectPolicy {
    pub fn fixed(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            max_attempts: 0,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay before reconnect attempt number `attempt` (0-based), or `None`
    /// once the policy gives up.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if self.max_attempts > 0 && attempt >= self.max_attempts {
            return None;
        }
        Some(Duration::from_millis(u64::from(self.delay_ms)))
    }
}

/// Handle for the user-triggered outbound messages.
///
/// Sends are queued to the connection loop. Anything queued while the link is
/// down is discarded when the next connection opens, never replayed.
#[derive(Clone)]
pub struct GameHandle {
    sender: UnboundedSender<ClientMessage>,
}

impl GameHandle {
    pub(crate) fn new(sender: UnboundedSender<ClientMessage>) -> Self {
        Self { sender }
    }

    /// Queue a message for the server
    pub fn send(&self, message: ClientMessage) -> Result<(), String> {
        crate::log_debug!("GameHandle::send {}", message.kind());
        self.sender
            .unbounded_send(message)
            .map_err(|e| format!("Failed to send: {}", e))
    }

    /// Submit an answer. Empty answers are not sent.
    ///
    /// Returns whether a message was queued.
    pub fn submit_answer(&self, answer: &str) -> Result<bool, String> {
        if answer.is_empty() {
            return Ok(false);
        }
        self.send(ClientMessage::Answer {
            answer: answer.to_string(),
        })?;
        Ok(true)
    }

    /// Pass the current question. Always sent; the server judges whether it
    /// is premature.
    pub fn pass_question(&self) -> Result<(), String> {
        self.send(ClientMessage::Pass)
    }
}

impl PartialEq for GameHandle {
    fn eq(&self, other: &Self) -> bool {
        self.sender.same_receiver(&other.sender)
    }
}

/// One open text-frame connection.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Next inbound text frame. `None` means the connection closed.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;
}

/// Opens transports. Called again for every reconnect.
#[async_trait(?Send)]
pub trait Connector {
    type Transport: Transport;

    async fn connect(&self, url: &str) -> Result<Self::Transport, TransportError>;
}

/// Wait on the platform timer.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(delay: Duration) {
    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

// Include platform-specific implementation
#[cfg(target_arch = "wasm32")]
mod connection_wasm;
#[cfg(target_arch = "wasm32")]
pub use connection_wasm::WebSocketConnector;

#[cfg(not(target_arch = "wasm32"))]
mod connection_native;
#[cfg(not(target_arch = "wasm32"))]
pub use connection_native::TungsteniteConnector;
