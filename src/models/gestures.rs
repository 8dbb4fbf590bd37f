//! Mouse gestures on the board panel, translated into controller input.
//!
//! Kept free of gpui so the press/move/release rules can be exercised
//! directly; the board view only forwards panel coordinates.

use crate::domain::{Piece, RulesEngine};
use crate::models::board_controller::{BoardController, DropOutcome};
use crate::net::EventSink;
use crate::ui::BoardLayout;

/// Cursor position of an in-flight drag, relative to the board panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragCursor {
    pub piece: Piece,
    pub mouse_x: f32,
    pub mouse_y: f32,
}

/// The floating piece under the cursor. Present only while the controller
/// has a pending drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    cursor: Option<DragCursor>,
}

impl DragTracker {
    pub fn cursor(&self) -> Option<DragCursor> {
        self.cursor
    }

    /// Mouse down. Returns true if the view should re-render.
    pub fn press<E: RulesEngine, S: EventSink>(
        &mut self,
        controller: &mut BoardController<E, S>,
        layout: &BoardLayout,
        x: f32,
        y: f32,
    ) -> bool {
        // a click anywhere dismisses the notice blocking the board
        if controller.dismiss_notice().is_some() {
            return true;
        }

        let Some(coord) = layout
            .pos_to_square(x, y)
            .and_then(|(row, col)| controller.projection().coord_at(row, col))
        else {
            return false;
        };
        if !controller.on_drag_start(coord) {
            return false;
        }

        self.cursor = controller
            .projection()
            .square(coord)
            .and_then(|square| square.piece)
            .map(|piece| DragCursor {
                piece,
                mouse_x: x,
                mouse_y: y,
            });
        true
    }

    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.mouse_x = x;
                cursor.mouse_y = y;
                true
            }
            None => false,
        }
    }

    /// Mouse up over the board panel: drop on a square, or abandon the
    /// drag when released on the padding around the board
    pub fn release<E: RulesEngine, S: EventSink>(
        &mut self,
        controller: &mut BoardController<E, S>,
        layout: &BoardLayout,
        x: f32,
        y: f32,
    ) -> bool {
        if self.cursor.take().is_none() && controller.pending_drag().is_none() {
            return false;
        }

        let target = layout
            .pos_to_square(x, y)
            .and_then(|(row, col)| controller.projection().coord_at(row, col));
        match target {
            Some(target) => {
                if let DropOutcome::Rejected(err) = controller.on_drop(target) {
                    tracing::debug!("{err}");
                }
            }
            None => controller.on_drag_end(),
        }
        true
    }

    /// Mouse up anywhere outside the board panel
    pub fn cancel<E: RulesEngine, S: EventSink>(
        &mut self,
        controller: &mut BoardController<E, S>,
    ) -> bool {
        if self.cursor.take().is_none() && controller.pending_drag().is_none() {
            return false;
        }
        controller.on_drag_end();
        true
    }

    /// Forget the cursor once the controller has discarded the drag
    /// (a server update or role change can do that mid-gesture)
    pub fn sync<E: RulesEngine, S: EventSink>(&mut self, controller: &BoardController<E, S>) {
        if controller.pending_drag().is_none() {
            self.cursor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::ScriptedEngine;
    use crate::domain::{Coord, MovePayload, Notice, PlayerRole};
    use crate::models::board_controller::PendingDrag;
    use crate::net::{ClientEvent, ServerEvent};

    type TestController = BoardController<ScriptedEngine, Vec<ClientEvent>>;

    // 50px squares, board from (20, 20) to (420, 420)
    fn layout() -> BoardLayout {
        BoardLayout::new(440.0, 440.0)
    }

    fn controller(role: PlayerRole) -> TestController {
        let mut controller = BoardController::new(ScriptedEngine::new(), Vec::new());
        controller.on_role_assigned(role);
        controller
    }

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn press_screen(
        tracker: &mut DragTracker,
        controller: &mut TestController,
        row: usize,
        col: usize,
    ) -> bool {
        let (x, y) = layout().square_center(row, col);
        tracker.press(controller, &layout(), x, y)
    }

    fn release_screen(
        tracker: &mut DragTracker,
        controller: &mut TestController,
        row: usize,
        col: usize,
    ) -> bool {
        let (x, y) = layout().square_center(row, col);
        tracker.release(controller, &layout(), x, y)
    }

    #[test]
    fn test_press_and_release_moves_piece() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        assert!(press_screen(&mut tracker, &mut controller, 6, 4));
        assert_eq!(controller.pending_drag(), Some(PendingDrag { from: at(6, 4) }));
        assert!(tracker.cursor().is_some());

        assert!(tracker.drag_to(250.0, 250.0));
        assert_eq!(tracker.cursor().map(|c| (c.mouse_x, c.mouse_y)), Some((250.0, 250.0)));

        assert!(release_screen(&mut tracker, &mut controller, 4, 4));
        assert!(tracker.cursor().is_none());
        assert!(controller.pending_drag().is_none());
        assert_eq!(controller.sink().len(), 1);
    }

    #[test]
    fn test_press_on_empty_square_starts_nothing() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        assert!(!press_screen(&mut tracker, &mut controller, 4, 4));
        assert!(tracker.cursor().is_none());
        assert!(!tracker.drag_to(100.0, 100.0));
        assert!(!release_screen(&mut tracker, &mut controller, 3, 4));
    }

    #[test]
    fn test_click_dismissing_notice_does_not_drag() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        // an illegal drop queues the invalid-move notice
        press_screen(&mut tracker, &mut controller, 6, 4);
        release_screen(&mut tracker, &mut controller, 3, 4);
        assert_eq!(controller.current_notice(), Some(Notice::InvalidMove));

        assert!(press_screen(&mut tracker, &mut controller, 6, 4));
        assert_eq!(controller.current_notice(), None);
        assert!(controller.pending_drag().is_none());
        assert!(tracker.cursor().is_none());
    }

    #[test]
    fn test_release_on_padding_ends_drag() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        press_screen(&mut tracker, &mut controller, 6, 4);
        assert!(tracker.release(&mut controller, &layout(), 5.0, 5.0));

        assert!(controller.pending_drag().is_none());
        assert!(tracker.cursor().is_none());
        assert!(controller.sink().is_empty());
        assert!(controller.engine().attempts.is_empty());
        assert_eq!(controller.current_notice(), None);
    }

    #[test]
    fn test_release_outside_panel_ends_drag() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        press_screen(&mut tracker, &mut controller, 6, 4);
        assert!(tracker.cancel(&mut controller));
        assert!(controller.pending_drag().is_none());
        assert!(tracker.cursor().is_none());

        // a later mouse-up over the board must not submit the abandoned move
        assert!(!release_screen(&mut tracker, &mut controller, 4, 4));
        assert!(controller.sink().is_empty());
        assert!(controller.engine().attempts.is_empty());
    }

    #[test]
    fn test_cancel_without_drag_is_noop() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();
        assert!(!tracker.cancel(&mut controller));
    }

    #[test]
    fn test_flipped_board_maps_to_mirrored_squares() {
        let mut controller = controller(PlayerRole::Black);
        controller.on_position_update("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        let mut tracker = DragTracker::default();

        // e7 is row 1 col 4 on the board, shown at row 6 col 3 for black
        assert!(press_screen(&mut tracker, &mut controller, 6, 3));
        assert_eq!(controller.pending_drag(), Some(PendingDrag { from: at(1, 4) }));

        assert!(release_screen(&mut tracker, &mut controller, 4, 3));
        assert_eq!(
            controller.sink(),
            &vec![ClientEvent::Move(MovePayload {
                from: "e7".to_string(),
                to: "e5".to_string(),
                promotion: "q".to_string(),
            })]
        );
    }

    #[test]
    fn test_sync_clears_cursor_after_board_state() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        press_screen(&mut tracker, &mut controller, 6, 4);
        controller.handle_server_event(ServerEvent::BoardState(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
        ));
        tracker.sync(&controller);

        assert!(tracker.cursor().is_none());
        assert!(!release_screen(&mut tracker, &mut controller, 4, 4));
        assert!(controller.sink().is_empty());
    }

    #[test]
    fn test_sync_keeps_cursor_while_dragging() {
        let mut controller = controller(PlayerRole::White);
        let mut tracker = DragTracker::default();

        press_screen(&mut tracker, &mut controller, 6, 4);
        tracker.sync(&controller);
        assert!(tracker.cursor().is_some());
    }
}
