//! Connection manager: owns the session's WebSocket lifecycle.
//!
//! ```text
//! connecting --open--> open --close/error--> closed --delay--> connecting ...
//! ```
//!
//! Every open sends exactly one INIT handshake. Closing is never terminal; the
//! injected [`ReconnectPolicy`] decides when (and whether) to try again.

use std::time::Duration;

use futures_channel::mpsc::{unbounded, UnboundedReceiver};
use futures_util::future::{self, Either};
use futures_util::StreamExt;
use letterwheel_shared::{ClientMessage, Language, TransportError};

use super::connection::{sleep, ConnectionState, Connector, GameHandle, ReconnectPolicy, Transport};
use crate::config::SessionConfig;
use crate::dispatcher::{Outcome, ProtocolDispatcher};
use crate::render::Renderer;

enum LinkEvent {
    Frame(Option<Result<String, TransportError>>),
    Outgoing(Option<ClientMessage>),
}

pub struct ConnectionManager<R> {
    url: String,
    language: Language,
    session_id: Option<String>,
    policy: ReconnectPolicy,
    state: ConnectionState,
    attempt: u32,
    connections: u32,
    dispatcher: ProtocolDispatcher<R>,
    handle: GameHandle,
    outbox: UnboundedReceiver<ClientMessage>,
}

impl<R: Renderer> ConnectionManager<R> {
    pub fn new(config: SessionConfig, renderer: R) -> Self {
        let (sender, outbox) = unbounded();
        let dispatcher = ProtocolDispatcher::new(config.language, config.circle, renderer);
        Self {
            url: config.ws_url,
            language: config.language,
            session_id: config.session_id,
            policy: config.reconnect,
            state: ConnectionState::Closed,
            attempt: 0,
            connections: 0,
            dispatcher,
            handle: GameHandle::new(sender),
            outbox,
        }
    }

    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of connections that reached the open state.
    pub fn connections(&self) -> u32 {
        self.connections
    }

    pub fn dispatcher(&self) -> &ProtocolDispatcher<R> {
        &self.dispatcher
    }

    /// Enter `connecting`.
    pub fn on_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
        if self.attempt == 0 {
            crate::log_info!("Connecting to {}", self.url);
        } else {
            crate::log_info!("Reconnecting to {} (attempt {})", self.url, self.attempt);
        }
    }

    /// The transport opened. Returns the handshake to send first.
    pub fn on_open(&mut self) -> ClientMessage {
        self.state = ConnectionState::Open;
        self.attempt = 0;
        self.connections += 1;
        crate::log_info!("WebSocket connected to {}", self.url);

        let stale = self.discard_queued();
        if stale > 0 {
            crate::log_warn!("Dropped {} message(s) queued while disconnected", stale);
        }

        ClientMessage::Init {
            language: self.language,
            session_id: self.session_id.clone(),
        }
    }

    /// Decode and dispatch one inbound frame. A bad frame is logged and
    /// dropped; it never ends the connection.
    pub fn on_message(&mut self, frame: &str) -> Option<Outcome> {
        crate::log_debug!("WebSocket received: {}", frame);
        match self.dispatcher.handle_frame(frame) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                crate::log_error!("Dropping inbound message: {}", e);
                None
            }
        }
    }

    /// The transport closed or failed to open. Returns the delay before the
    /// next attempt, or `None` if the policy gives up.
    pub fn on_close(&mut self) -> Option<Duration> {
        self.state = ConnectionState::Closed;
        let delay = self.policy.delay_for_attempt(self.attempt);
        match delay {
            Some(delay) => {
                crate::log_info!(
                    "Reconnecting to {} in {}ms (attempt {})",
                    self.url,
                    delay.as_millis(),
                    self.attempt + 1
                );
                self.attempt += 1;
            }
            None => crate::log_error!(
                "Giving up on {} after {} failed attempts",
                self.url,
                self.attempt
            ),
        }
        delay
    }

    /// Run the connect/reconnect loop until the policy gives up.
    pub async fn run<C: Connector>(&mut self, connector: &C) {
        loop {
            self.on_connecting();
            let url = self.url.clone();
            match connector.connect(&url).await {
                Ok(mut transport) => {
                    let init = self.on_open();
                    if self.write(&mut transport, &init).await.is_ok() {
                        self.pump(&mut transport).await;
                    }
                    crate::log_info!("WebSocket to {} closed", self.url);
                }
                Err(e) => crate::log_error!("WebSocket error for {}: {}", self.url, e),
            }

            let Some(delay) = self.on_close() else {
                break;
            };
            sleep(delay).await;
        }
    }

    /// Move frames both ways until the transport closes.
    async fn pump<T: Transport>(&mut self, transport: &mut T) {
        loop {
            let event = match future::select(transport.recv(), self.outbox.next()).await {
                Either::Left((frame, _)) => LinkEvent::Frame(frame),
                Either::Right((message, _)) => LinkEvent::Outgoing(message),
            };

            match event {
                LinkEvent::Frame(Some(Ok(frame))) => {
                    self.on_message(&frame);
                }
                LinkEvent::Frame(Some(Err(e))) => {
                    crate::log_error!("WebSocket read error: {}", e);
                    return;
                }
                LinkEvent::Frame(None) => return,
                LinkEvent::Outgoing(Some(message)) => {
                    if self.write(transport, &message).await.is_err() {
                        return;
                    }
                }
                // The manager holds a sender, so the outbox never ends
                LinkEvent::Outgoing(None) => return,
            }
        }
    }

    async fn write<T: Transport>(
        &self,
        transport: &mut T,
        message: &ClientMessage,
    ) -> Result<(), TransportError> {
        let json = message
            .to_json()
            .map_err(|e| TransportError::Send(e.to_string()))?;
        crate::log_info!("Sending to {}: {}", self.url, message.kind());
        transport.send(json).await.map_err(|e| {
            crate::log_error!("Send failed: {}", e);
            e
        })
    }

    fn discard_queued(&mut self) -> usize {
        let mut dropped = 0;
        while let Ok(Some(_)) = self.outbox.try_next() {
            dropped += 1;
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::QuestionView;
    use crate::store::Alphabet;
    use letterwheel_shared::{CircleGeometry, GameOverStats};

    struct NullRenderer;

    impl Renderer for NullRenderer {
        fn render_circle(&mut self, _: &Alphabet) {}
        fn render_question(&mut self, _: &QuestionView) {}
        fn render_timer(&mut self, _: &str) {}
        fn render_game_over(&mut self, _: &GameOverStats) {}
    }

    fn manager(policy: ReconnectPolicy) -> ConnectionManager<NullRenderer> {
        let config = SessionConfig {
            ws_url: "ws://localhost:8080/ws".to_string(),
            language: Language::Tr,
            session_id: None,
            reconnect: policy,
            circle: CircleGeometry::default(),
        };
        ConnectionManager::new(config, NullRenderer)
    }

    #[test]
    fn open_yields_init_with_the_session_language() {
        let mut m = manager(ReconnectPolicy::default());
        m.on_connecting();
        assert_eq!(m.state(), ConnectionState::Connecting);

        let init = m.on_open();
        assert_eq!(m.state(), ConnectionState::Open);
        assert_eq!(
            init,
            ClientMessage::Init {
                language: Language::Tr,
                session_id: None,
            }
        );
    }

    #[test]
    fn default_policy_retries_forever_after_two_seconds() {
        let mut m = manager(ReconnectPolicy::default());
        for _ in 0..100 {
            assert_eq!(m.on_close(), Some(Duration::from_millis(2000)));
            assert_eq!(m.state(), ConnectionState::Closed);
        }
    }

    #[test]
    fn bounded_policy_counts_consecutive_failures() {
        let mut m = manager(ReconnectPolicy::fixed(0).with_max_attempts(2));
        assert!(m.on_close().is_some());
        assert!(m.on_close().is_some());
        assert!(m.on_close().is_none());

        let mut m = manager(ReconnectPolicy::fixed(0).with_max_attempts(1));
        assert!(m.on_close().is_some());
        m.on_open();
        assert!(m.on_close().is_some());
    }

    #[test]
    fn messages_queued_while_closed_are_discarded_on_open() {
        let mut m = manager(ReconnectPolicy::default());
        let handle = m.handle();
        handle.submit_answer("late").unwrap();
        handle.pass_question().unwrap();

        m.on_open();
        assert!(m.outbox.try_next().is_err());
    }

    #[test]
    fn bad_frames_are_dropped() {
        let mut m = manager(ReconnectPolicy::default());
        assert_eq!(m.on_message("][ nope"), None);
        assert_eq!(
            m.on_message(r#"{"type":"PING"}"#),
            Some(Outcome::Ignored)
        );
    }

    #[test]
    fn empty_answer_is_not_sent() {
        let mut m = manager(ReconnectPolicy::default());
        let handle = m.handle();
        assert_eq!(handle.submit_answer(""), Ok(false));
        assert!(m.outbox.try_next().is_err());

        assert_eq!(handle.submit_answer("abc"), Ok(true));
        assert_eq!(
            m.outbox.try_next().unwrap(),
            Some(ClientMessage::Answer {
                answer: "abc".to_string()
            })
        );
        assert!(m.outbox.try_next().is_err());
    }
}
