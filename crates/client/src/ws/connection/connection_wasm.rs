//! WASM/Web transport using web_sys::WebSocket.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures_channel::mpsc::{unbounded, UnboundedReceiver};
use futures_channel::oneshot;
use futures_util::StreamExt;
use letterwheel_shared::TransportError;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::{Connector, Transport};

type OpenSignal = Rc<RefCell<Option<oneshot::Sender<Result<(), TransportError>>>>>;

/// Opens browser WebSockets. The session cookie travels with the upgrade
/// request on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

#[async_trait(?Send)]
impl Connector for WebSocketConnector {
    type Transport = WebSocketTransport;

    async fn connect(&self, url: &str) -> Result<Self::Transport, TransportError> {
        let ws = WebSocket::new(url)
            .map_err(|e| TransportError::Connect(format!("Failed to create WebSocket: {:?}", e)))?;

        let (inbound_tx, inbound) = unbounded::<Result<String, TransportError>>();
        let (open_tx, open_rx) = oneshot::channel();
        let open_signal: OpenSignal = Rc::new(RefCell::new(Some(open_tx)));

        // Set up open handler
        let signal = open_signal.clone();
        let onopen = Closure::wrap(Box::new(move |_: Event| {
            crate::log_debug!("WebSocket onopen fired");
            if let Some(tx) = signal.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }) as Box<dyn FnMut(Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        // Set up message handler
        let message_tx = inbound_tx.clone();
        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Some(text) = e.data().as_string() {
                let _ = message_tx.unbounded_send(Ok(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        // Set up close handler; it also fails a pending open
        let signal = open_signal.clone();
        let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
            let reason = if e.reason().is_empty() {
                format!("Code {}", e.code())
            } else {
                e.reason()
            };
            crate::log_info!("WebSocket onclose: {}", reason);
            if let Some(tx) = signal.borrow_mut().take() {
                let _ = tx.send(Err(TransportError::Connect(reason)));
            }
            inbound_tx.close_channel();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        // Set up error handler; a close event always follows
        let onerror = Closure::wrap(Box::new(move |_: ErrorEvent| {
            crate::log_error!("WebSocket onerror fired");
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let transport = WebSocketTransport {
            ws,
            inbound,
            _onopen: onopen,
            _onmessage: onmessage,
            _onclose: onclose,
            _onerror: onerror,
        };

        match open_rx.await {
            Ok(Ok(())) => Ok(transport),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(TransportError::Closed),
        }
    }
}

/// An open browser WebSocket. The callbacks live as long as the transport
/// and are detached when it is dropped.
pub struct WebSocketTransport {
    ws: WebSocket,
    inbound: UnboundedReceiver<Result<String, TransportError>>,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onerror: Closure<dyn FnMut(ErrorEvent)>,
}

#[async_trait(?Send)]
impl Transport for WebSocketTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        // readyState 1 = OPEN
        if self.ws.ready_state() != WebSocket::OPEN {
            return Err(TransportError::Closed);
        }
        self.ws
            .send_with_str(&frame)
            .map_err(|e| TransportError::Send(format!("{:?}", e)))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.next().await
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        let _ = self.ws.close();
    }
}
