//! Native/Desktop transport using tokio-tungstenite.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use letterwheel_shared::TransportError;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header::COOKIE, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::{Connector, Transport};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens WebSocket connections, presenting the session cookie on the upgrade
/// request the way a browser would.
#[derive(Debug, Clone, Default)]
pub struct TungsteniteConnector {
    session_id: Option<String>,
}

impl TungsteniteConnector {
    pub fn new(session_id: Option<String>) -> Self {
        Self { session_id }
    }
}

#[async_trait(?Send)]
impl Connector for TungsteniteConnector {
    type Transport = TungsteniteTransport;

    async fn connect(&self, url: &str) -> Result<Self::Transport, TransportError> {
        let mut request = url
            .into_client_request()
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

        if let Some(session_id) = &self.session_id {
            let cookie = HeaderValue::from_str(&format!("session_id={}", session_id))
                .map_err(|e| TransportError::Connect(e.to_string()))?;
            request.headers_mut().insert(COOKIE, cookie);
        }

        let (socket, _response) = connect_async(request)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(TungsteniteTransport { socket })
    }
}

pub struct TungsteniteTransport {
    socket: Socket,
}

#[async_trait(?Send)]
impl Transport for TungsteniteTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.socket
            .send(Message::text(frame))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.socket.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(frame)) => {
                    crate::log_info!("Received close frame: {:?}", frame);
                    return None;
                }
                Ok(Message::Ping(data)) => {
                    // Pong is handled automatically by tungstenite
                    crate::log_debug!("Received ping: {:?}", data);
                }
                Ok(_) => {
                    // Ignore binary, pong, etc.
                }
                Err(e) => return Some(Err(TransportError::Receive(e.to_string()))),
            }
        }
    }
}
