//! Board controller - turns drag gestures and server events into moves and renders.
//!
//! Owns the rules engine, the outbound event sink, the viewer's role and the
//! drag in progress. Knows nothing about the UI toolkit: a view feeds it
//! `on_drag_start` / `on_drag_end` / `on_drop` and draws [`BoardProjection`].

use std::collections::VecDeque;

use crate::domain::{Coord, MoveIntent, Notice, PlayerRole, RulesEngine, game_status};
use crate::net::{ClientEvent, EventSink, ServerEvent};
use crate::ui::view_models::BoardProjection;

/// Where the piece being dragged came from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingDrag {
    pub from: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move {0}")]
    Illegal(MoveIntent),
}

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged
    NoDrag,
    /// The engine accepted the move and it was sent to the server
    Moved(MoveIntent),
    /// The engine refused the move; a notice was queued
    Rejected(MoveError),
}

pub struct BoardController<E: RulesEngine, S: EventSink> {
    engine: E,
    sink: S,
    role: PlayerRole,
    pending_drag: Option<PendingDrag>,
    /// Blocking notices waiting to be dismissed, oldest first
    notices: VecDeque<Notice>,
    projection: BoardProjection,
    render_count: u64,
}

impl<E: RulesEngine, S: EventSink> BoardController<E, S> {
    pub fn new(engine: E, sink: S) -> Self {
        let mut controller = Self {
            engine,
            sink,
            role: PlayerRole::Spectator,
            pending_drag: None,
            notices: VecDeque::new(),
            projection: BoardProjection::default(),
            render_count: 0,
        };
        controller.render();
        controller
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn role(&self) -> PlayerRole {
        self.role
    }

    pub fn pending_drag(&self) -> Option<PendingDrag> {
        self.pending_drag
    }

    pub fn projection(&self) -> &BoardProjection {
        &self.projection
    }

    /// Number of full re-renders since construction
    #[cfg(test)]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Rebuild the projection from the engine's board and the current role
    pub fn render(&mut self) {
        self.projection = BoardProjection::build(&self.engine.board(), self.role);
        self.render_count += 1;
        tracing::trace!("render #{}", self.render_count);
    }

    /// Start dragging the piece at `coord` if this role may move it
    pub fn on_drag_start(&mut self, coord: Coord) -> bool {
        let draggable = self
            .projection
            .square(coord)
            .is_some_and(|square| square.draggable);
        if !draggable {
            return false;
        }

        tracing::debug!("drag start: {coord}");
        self.pending_drag = Some(PendingDrag { from: coord });
        true
    }

    pub fn on_drag_end(&mut self) {
        if self.pending_drag.take().is_some() {
            tracing::debug!("drag end");
        }
    }

    /// Finish a drag over `target`, attempting the move if a drag is pending
    pub fn on_drop(&mut self, target: Coord) -> DropOutcome {
        let Some(drag) = self.pending_drag.take() else {
            return DropOutcome::NoDrag;
        };

        tracing::debug!("drop: {target}");
        match self.handle_move(drag.from, target) {
            Ok(intent) => DropOutcome::Moved(intent),
            Err(err) => {
                self.notices.push_back(Notice::InvalidMove);
                DropOutcome::Rejected(err)
            }
        }
    }

    /// Attempt `from -> to` through the engine and send it on success
    pub fn handle_move(&mut self, from: Coord, to: Coord) -> Result<MoveIntent, MoveError> {
        let intent = MoveIntent::new(from, to);
        tracing::info!("attempting move: {} to {}", intent.from, intent.to);

        let Some(applied) = self.engine.try_move(&intent) else {
            tracing::info!("invalid move: {intent}");
            return Err(MoveError::Illegal(intent));
        };

        tracing::info!("move valid: {} ({})", intent, applied.san);
        self.sink.emit(ClientEvent::Move(intent.payload()));
        if let Some(notice) = self.check_game_status() {
            self.notices.push_back(notice);
        }
        self.render();
        Ok(intent)
    }

    pub fn check_game_status(&self) -> Option<Notice> {
        game_status(&self.engine)
    }

    pub fn on_role_assigned(&mut self, role: PlayerRole) {
        tracing::info!("player role: {role}");
        self.role = role;
        self.render();
        self.revalidate_drag();
    }

    pub fn on_spectator_assigned(&mut self) {
        tracing::info!("spectator role");
        self.role = PlayerRole::Spectator;
        self.render();
        self.revalidate_drag();
    }

    /// Drop a pending drag whose piece the current role may no longer move
    fn revalidate_drag(&mut self) {
        let Some(drag) = self.pending_drag else {
            return;
        };
        let still_draggable = self
            .projection
            .square(drag.from)
            .is_some_and(|square| square.draggable);
        if !still_draggable {
            tracing::debug!("discarding drag from {}: role changed", drag.from);
            self.pending_drag = None;
        }
    }

    /// Replace the local position with the server's
    pub fn on_position_update(&mut self, fen: &str) {
        self.pending_drag = None;
        match self.engine.load(fen) {
            Ok(()) => tracing::info!("board state updated: {fen}"),
            Err(err) => tracing::warn!("keeping previous position: {err}"),
        }
        self.render();
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::PlayerRole(code) => {
                let role = PlayerRole::from_code(&code).unwrap_or_else(|| {
                    tracing::warn!("unknown role {code:?}, treating as spectator");
                    PlayerRole::Spectator
                });
                self.on_role_assigned(role);
            }
            ServerEvent::SpectatorRole => self.on_spectator_assigned(),
            ServerEvent::BoardState(fen) => self.on_position_update(&fen),
        }
    }

    /// The notice currently blocking the board, if any
    pub fn current_notice(&self) -> Option<Notice> {
        self.notices.front().copied()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }
}
