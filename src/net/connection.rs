//! WebSocket transport to the game server.
//!
//! Architecture:
//! - Socket I/O runs on a dedicated OS thread driving a single-threaded tokio runtime
//! - Inbound events reach the UI over a std channel, polled by the session model
//! - Outbound events are queued on an unbounded tokio channel, so emitting never blocks the UI

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::tungstenite::{self, Message};
use url::Url;

use crate::net::protocol::{ClientEvent, EventSink, ServerEvent};

/// Messages sent from the socket thread to the session model
#[derive(Debug)]
pub enum TransportEvent {
    /// Handshake finished
    Connected,
    /// A decoded server event
    Message(ServerEvent),
    /// Socket closed by either side
    Closed,
    /// Error occurred; the socket is gone
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    Socket(#[from] tungstenite::Error),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to start transport runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Sending side of a connection, handed to the board controller
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    commands: UnboundedSender<ClientEvent>,
}

impl ConnectionHandle {
    /// A handle whose events go nowhere, for boards without a server
    pub fn detached() -> Self {
        let (commands, _) = unbounded_channel();
        Self { commands }
    }
}

impl EventSink for ConnectionHandle {
    fn emit(&mut self, event: ClientEvent) {
        let name = event.name();
        if self.commands.send(event).is_err() {
            tracing::warn!("dropping outbound {name} event: connection closed");
        }
    }
}

/// Open a connection on a background thread.
///
/// Returns immediately; the outcome of the handshake arrives as
/// [`TransportEvent::Connected`] or [`TransportEvent::Error`].
pub fn connect(url: Url) -> anyhow::Result<(ConnectionHandle, Receiver<TransportEvent>)> {
    let (event_tx, event_rx) = mpsc::channel::<TransportEvent>();
    let (cmd_tx, cmd_rx) = unbounded_channel::<ClientEvent>();

    thread::Builder::new()
        .name("board-transport".to_string())
        .spawn(move || {
            let result = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(TransportError::from)
                .and_then(|runtime| runtime.block_on(run_socket(&url, cmd_rx, &event_tx)));

            let last = match result {
                Ok(()) => {
                    tracing::info!("connection to {url} closed");
                    TransportEvent::Closed
                }
                Err(err) => {
                    tracing::error!("connection to {url} failed: {err}");
                    TransportEvent::Error(err.to_string())
                }
            };
            let _ = event_tx.send(last);
        })?;

    Ok((ConnectionHandle { commands: cmd_tx }, event_rx))
}

async fn run_socket(
    url: &Url,
    mut commands: UnboundedReceiver<ClientEvent>,
    events: &Sender<TransportEvent>,
) -> Result<(), TransportError> {
    tracing::info!("connecting to {url}");
    let (socket, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
    let (mut write, mut read) = socket.split();

    if events.send(TransportEvent::Connected).is_err() {
        return Ok(());
    }

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(event) = command else {
                    // every handle dropped: the session is over
                    let _ = write.close().await;
                    return Ok(());
                };
                let text = serde_json::to_string(&event)?;
                tracing::debug!("-> {text}");
                write.send(Message::Text(text.into())).await?;
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("<- {text}");
                        match decode_frame(&text) {
                            Some(event) => {
                                if events.send(TransportEvent::Message(event)).is_err() {
                                    return Ok(());
                                }
                            }
                            None => continue,
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => return Ok(()),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                }
            }
        }
    }
}

/// Decode one text frame, logging and skipping anything that is not a known event
fn decode_frame(text: &str) -> Option<ServerEvent> {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!("ignoring malformed frame {text:?}: {err}");
            None
        }
    }
}
