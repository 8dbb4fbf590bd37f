//! Square rendering component.

use crate::ui::components::render_piece;
use crate::ui::theme::{GHOST_OPACITY, square_color};
use crate::ui::view_models::SquareView;
use gpui::{div, prelude::*, px};

/// Render a single board square with optional piece
pub fn render_square(
    square: SquareView,
    is_being_dragged: bool,
    square_size: f32,
    piece_size: f32,
) -> impl IntoElement {
    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .size(px(square_size))
        .bg(square_color(square.shade))
        .flex()
        .items_center()
        .justify_center()
        .when_some(square.piece, |el, p| {
            if is_being_dragged {
                // ghost piece on original square
                el.child(
                    div()
                        .size_full()
                        .opacity(GHOST_OPACITY)
                        .child(render_piece(p, piece_size)),
                )
            } else {
                el.child(render_piece(p, piece_size))
            }
        })
}
