pub mod connection;
pub mod protocol;

pub use connection::{ConnectionHandle, TransportError, TransportEvent};
pub use protocol::{ClientEvent, EventSink, ServerEvent};
