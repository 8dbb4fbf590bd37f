//! Named events exchanged with the game server.
//!
//! Every WebSocket text frame carries one event as
//! `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::domain::MovePayload;

/// Events pushed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Role code, "w" or "b"
    PlayerRole(String),
    SpectatorRole,
    /// Authoritative position as FEN
    BoardState(String),
}

/// Events sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Move(MovePayload),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Move(_) => "move",
        }
    }
}

/// Outbound half of the transport as seen by the board controller
pub trait EventSink {
    fn emit(&mut self, event: ClientEvent);
}

/// Recording sink for tests
#[cfg(test)]
impl EventSink for Vec<ClientEvent> {
    fn emit(&mut self, event: ClientEvent) {
        self.push(event);
    }
}
