//! Session model - one board session bound to one server connection.
//!
//! Architecture:
//! - The board controller holds all game-facing state
//! - Socket I/O happens on the transport thread (see `net::connection`)
//! - A GPUI background task polls the transport channel and feeds the controller,
//!   so every server event is handled to completion on the UI thread

use std::sync::mpsc::Receiver;
use std::time::Duration;

use gpui::{AsyncApp, Context, Pixels, Size, Task, WeakEntity, px};
use url::Url;

use crate::domain::{Coord, PieceColor, RulesEngine, ShakmatyEngine};
use crate::models::board_controller::BoardController;
use crate::models::gestures::{DragCursor, DragTracker};
use crate::net::{ConnectionHandle, TransportEvent, connection};
use crate::ui::BoardLayout;
use crate::ui::theme::INITIAL_LEFT_PANEL;

pub type SessionController = BoardController<ShakmatyEngine, ConnectionHandle>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Failed(String),
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Connecting => "Connecting…".to_string(),
            ConnectionStatus::Connected => "Connected".to_string(),
            ConnectionStatus::Disconnected => "Disconnected".to_string(),
            ConnectionStatus::Failed(reason) => format!("Connection failed: {reason}"),
        }
    }
}

pub struct SessionModel {
    controller: SessionController,
    server_url: Url,
    status: ConnectionStatus,
    /// Channel receiver for transport events (polled by background task)
    event_receiver: Option<Receiver<TransportEvent>>,
    drag: DragTracker,
    /// Measured panel size from canvas
    pub panel_size: Size<Pixels>,
    /// Background polling task (kept alive while connected)
    _poll_task: Option<Task<()>>,
}

impl SessionModel {
    /// Create the session and start connecting to `server_url`.
    ///
    /// `start_fen` is shown until the server sends its first board state.
    pub fn new(server_url: Url, start_fen: Option<&str>, cx: &mut Context<Self>) -> Self {
        let mut engine = ShakmatyEngine::new();
        if let Some(fen) = start_fen {
            if let Err(err) = engine.load(fen) {
                tracing::warn!("ignoring start position: {err}");
            }
        }

        let (handle, receiver, status) = match connection::connect(server_url.clone()) {
            Ok((handle, receiver)) => (handle, Some(receiver), ConnectionStatus::Connecting),
            Err(err) => {
                tracing::error!("could not start transport: {err:#}");
                (
                    ConnectionHandle::detached(),
                    None,
                    ConnectionStatus::Failed(err.to_string()),
                )
            }
        };

        let mut session = Self {
            controller: BoardController::new(engine, handle),
            server_url,
            status,
            event_receiver: receiver,
            drag: DragTracker::default(),
            panel_size: Size {
                width: px(INITIAL_LEFT_PANEL),
                height: px(600.0),
            },
            _poll_task: None,
        };

        if session.event_receiver.is_some() {
            let poll_task = cx.spawn(
                async move |weak_entity: WeakEntity<SessionModel>, cx: &mut AsyncApp| {
                    Self::run_event_loop(weak_entity, cx).await;
                },
            );
            session._poll_task = Some(poll_task);
        }

        session
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn drag_cursor(&self) -> Option<DragCursor> {
        self.drag.cursor()
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::from_panel(self.panel_size)
    }

    /// Background event loop that polls the channel and updates the model
    async fn run_event_loop(weak_entity: WeakEntity<SessionModel>, cx: &mut AsyncApp) {
        const POLL_INTERVAL: Duration = Duration::from_millis(16); // ~60fps

        loop {
            cx.background_executor().timer(POLL_INTERVAL).await;

            let should_continue = weak_entity.update(cx, |session, cx| {
                if session.process_pending_events() {
                    cx.notify();
                }
                session.event_receiver.is_some()
            });

            match should_continue {
                Ok(true) => continue,
                _ => break, // transport finished or entity dropped
            }
        }
    }

    /// Drain the transport channel. Returns true if anything was handled.
    fn process_pending_events(&mut self) -> bool {
        let events: Vec<TransportEvent> = match &self.event_receiver {
            Some(rx) => rx.try_iter().collect(),
            None => return false,
        };

        if events.is_empty() {
            return false;
        }

        for event in events {
            self.apply_transport_event(event);
        }
        true
    }

    fn apply_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                tracing::info!("connected to {}", self.server_url);
                self.status = ConnectionStatus::Connected;
            }
            TransportEvent::Message(event) => {
                self.controller.handle_server_event(event);
                // a server update may have discarded the drag underneath the cursor
                self.drag.sync(&self.controller);
            }
            TransportEvent::Closed => {
                self.status = ConnectionStatus::Disconnected;
                self.event_receiver = None;
            }
            TransportEvent::Error(reason) => {
                self.status = ConnectionStatus::Failed(reason);
                self.event_receiver = None;
            }
        }
    }

    /// Mouse down on the board panel. Returns true if the view should re-render.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let layout = self.layout();
        self.drag.press(&mut self.controller, &layout, x, y)
    }

    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        self.drag.drag_to(x, y)
    }

    /// Mouse up over the board panel
    pub fn release(&mut self, x: f32, y: f32) -> bool {
        let layout = self.layout();
        self.drag.release(&mut self.controller, &layout, x, y)
    }

    /// Mouse up outside the board panel abandons the drag
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel(&mut self.controller)
    }

    /// Coordinate of the square the drag started from
    pub fn dragging_from(&self) -> Option<Coord> {
        self.controller.pending_drag().map(|drag| drag.from)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.controller.engine().turn()
    }
}
