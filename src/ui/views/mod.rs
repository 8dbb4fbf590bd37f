mod board_view;
mod status_panel;

pub use board_view::ChessBoardView;
pub use status_panel::render_status_panel;
