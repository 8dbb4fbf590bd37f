//! Chess board view - the board with drag-and-drop piece movement.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels,
    Subscription, Window, canvas, div, prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};

use crate::domain::Notice;
use crate::models::SessionModel;
use crate::ui::components::{render_piece, render_square};
use crate::ui::theme::{
    BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, NOTICE_BG, NOTICE_SCRIM,
    NOTICE_SCRIM_OPACITY, PANEL_BG, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::views::render_status_panel;

/// The board view that observes a SessionModel
pub struct ChessBoardView {
    model: Entity<SessionModel>,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(model: Entity<SessionModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            _subscription,
        }
    }
}

/// Blocking notice drawn over the board until clicked
fn render_notice(notice: Notice) -> impl IntoElement {
    div()
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .child(
            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .bg(rgb(NOTICE_SCRIM))
                .opacity(NOTICE_SCRIM_OPACITY),
        )
        .child(
            div()
                .flex()
                .flex_col()
                .gap_2()
                .p_4()
                .rounded_md()
                .bg(rgb(NOTICE_BG))
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .child(notice.message()),
                )
                .child(
                    div()
                        .text_color(rgb(TEXT_SECONDARY))
                        .text_sm()
                        .child("Click to continue"),
                ),
        )
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model = self.model.clone();
        let model_down = model.clone();
        let model_move = model.clone();
        let model_up = model.clone();
        let model_up_out = model.clone();
        let model_measure = model.clone();

        let session = self.model.read(cx);
        let layout = session.layout();
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let dragging_from = session.dragging_from();
        let notice = session.controller().current_notice();

        // Floating piece follows cursor during drag
        let floating_piece = session.drag_cursor().map(|d| {
            div()
                .absolute()
                .left(px(d.mouse_x - square_size / 2.0))
                .top(px(d.mouse_y - square_size / 2.0))
                .size(px(square_size))
                .child(render_piece(d.piece, piece_size))
        });

        // Rows in screen order; black's view is already mirrored
        let rows = session.controller().projection().rows().to_vec();

        // Board element with fixed size - always maintains 1:1 aspect ratio
        let board_total_size = layout.board_total_size();
        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children(rows.into_iter().map(|row| {
                div().flex().flex_shrink_0().children(row.into_iter().map(|square| {
                    let is_being_dragged = dragging_from == Some(square.coord);
                    render_square(square, is_being_dragged, square_size, piece_size)
                }))
            }));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            .when_some(floating_piece, |el, fp| el.child(fp))
            .when_some(notice, |el, n| el.child(render_notice(n)))
            // Mouse down: dismiss a notice or start a drag
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    model_down.update(cx, |session, cx| {
                        let pos = ev.position;
                        if session.press(pos.x.into(), pos.y.into()) {
                            cx.notify();
                        }
                    });
                },
            )
            // Mouse move: update drag position
            .on_mouse_move(move |ev: &MouseMoveEvent, _, cx| {
                model_move.update(cx, |session, cx| {
                    if session.drag_to(ev.position.x.into(), ev.position.y.into()) {
                        cx.notify();
                    }
                });
            })
            // Mouse up: drop the piece
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                model_up.update(cx, |session, cx| {
                    let pos = ev.position;
                    if session.release(pos.x.into(), pos.y.into()) {
                        cx.notify();
                    }
                });
            })
            // Mouse up outside the panel: abandon the drag
            .on_mouse_up_out(MouseButton::Left, move |_: &MouseUpEvent, _window, cx| {
                model_up_out.update(cx, |session, cx| {
                    if session.cancel_drag() {
                        cx.notify();
                    }
                });
            });

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                model_measure.update(cx, |session, cx| {
                    if session.panel_size != bounds.size {
                        session.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let status_panel_content = render_status_panel(&model, cx);

        // Main resizable layout
        div().size_full().child(
            h_resizable("board-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_LEFT_PANEL))
                        .size_range(px(320.)..px(1200.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_RIGHT_PANEL))
                        .size_range(px(150.)..Pixels::MAX)
                        .child(status_panel_content),
                ),
        )
    }
}
