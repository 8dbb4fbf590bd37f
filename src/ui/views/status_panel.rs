//! Status panel - connection, role and position details beside the board.

use gpui::{App, Entity, div, prelude::*, px, rgb};

use crate::domain::{PieceColor, RulesEngine};
use crate::models::{ConnectionStatus, SessionModel};
use crate::ui::theme::{
    BORDER_COLOR, PANEL_BG, STATUS_BG, TEXT_ERROR, TEXT_PRIMARY, TEXT_SECONDARY,
};

fn render_row(label: &'static str, value: String, value_color: u32) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .gap_1()
        .py_1()
        .child(
            div()
                .text_color(rgb(TEXT_SECONDARY))
                .text_sm()
                .child(label),
        )
        .child(
            div()
                .text_color(rgb(value_color))
                .text_sm()
                .child(value),
        )
}

/// Render the status panel for a session
pub fn render_status_panel(model: &Entity<SessionModel>, cx: &App) -> impl IntoElement {
    let session = model.read(cx);
    let controller = session.controller();

    let status = session.status();
    let status_color = match status {
        ConnectionStatus::Failed(_) => TEXT_ERROR,
        _ => TEXT_PRIMARY,
    };
    let turn = match session.side_to_move() {
        PieceColor::White => "White",
        PieceColor::Black => "Black",
    };

    let orientation = if controller.projection().is_flipped() {
        "Black at bottom"
    } else {
        "White at bottom"
    };

    let content = div()
        .size_full()
        .flex()
        .flex_col()
        .bg(rgb(STATUS_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        // header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .text_sm()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Game"),
        )
        .child(
            div()
                .id("status-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .flex()
                .flex_col()
                .gap_1()
                .child(render_row("Connection", status.label(), status_color))
                .child(render_row(
                    "Server",
                    session.server_url().to_string(),
                    TEXT_SECONDARY,
                ))
                .child(render_row(
                    "You play",
                    controller.role().to_string(),
                    TEXT_PRIMARY,
                ))
                .child(render_row("Board", orientation.to_string(), TEXT_SECONDARY))
                .child(render_row("To move", turn.to_string(), TEXT_PRIMARY))
                .child(render_row(
                    "Position",
                    controller.engine().fen(),
                    TEXT_SECONDARY,
                )),
        );

    div()
        .size_full()
        .bg(rgb(PANEL_BG))
        .p(px(20.0))
        .child(content)
}
